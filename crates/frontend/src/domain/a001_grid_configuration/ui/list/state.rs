use contracts::domain::a001_grid_configuration::aggregate::GridConfigurationListQuery;
use contracts::enums::keyword::Keyword;
use leptos::prelude::*;

pub const DEFAULT_PAGE_SIZE: u64 = 20;

#[derive(Clone, Debug, PartialEq)]
pub struct GridListState {
    pub keyword: Option<Keyword>,
    pub search: String,
    /// Номер страницы, начиная с 1
    pub page: u64,
    pub per_page: u64,
}

impl Default for GridListState {
    fn default() -> Self {
        Self {
            keyword: None,
            search: String::new(),
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl GridListState {
    /// Смена фильтра возвращает на первую страницу
    pub fn set_keyword(&mut self, keyword: Option<Keyword>) {
        if self.keyword != keyword {
            self.keyword = keyword;
            self.page = 1;
        }
    }

    pub fn set_search(&mut self, search: &str) {
        let search = search.trim();
        if self.search != search {
            self.search = search.to_string();
            self.page = 1;
        }
    }

    pub fn set_per_page(&mut self, per_page: u64) {
        if self.per_page != per_page {
            self.per_page = per_page;
            self.page = 1;
        }
    }

    pub fn to_query(&self) -> GridConfigurationListQuery {
        GridConfigurationListQuery {
            keyword: self.keyword,
            search: Some(self.search.clone()).filter(|s| !s.is_empty()),
            page: Some(self.page),
            per_page: Some(self.per_page),
        }
    }
}

/// Пока сохраняется порядок, новое перетаскивание не начинается:
/// откат неудачного сохранения иначе затёр бы следующий перенос
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReorderGate {
    persisting: bool,
}

impl ReorderGate {
    pub fn can_drag(&self) -> bool {
        !self.persisting
    }

    /// false, если предыдущее сохранение ещё не завершилось
    pub fn begin(&mut self) -> bool {
        if self.persisting {
            return false;
        }
        self.persisting = true;
        true
    }

    pub fn finish(&mut self) {
        self.persisting = false;
    }
}

pub fn create_state() -> RwSignal<GridListState> {
    RwSignal::new(GridListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_reset_page() {
        let mut state = GridListState {
            page: 3,
            ..Default::default()
        };
        state.set_keyword(Some(Keyword::Home));
        assert_eq!(state.page, 1);

        state.page = 4;
        state.set_keyword(Some(Keyword::Home));
        assert_eq!(state.page, 4, "тот же фильтр не сбрасывает страницу");

        state.set_search("  баннер ");
        assert_eq!(state.search, "баннер");
        assert_eq!(state.page, 1);

        state.page = 2;
        state.set_per_page(50);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_reorder_gate_blocks_second_drag_until_saved() {
        let mut gate = ReorderGate::default();
        assert!(gate.can_drag());
        assert!(gate.begin());

        assert!(!gate.can_drag());
        assert!(!gate.begin(), "второй перенос ждёт завершения первого");

        gate.finish();
        assert!(gate.can_drag());
        assert!(gate.begin());
    }

    #[test]
    fn test_to_query_skips_empty_search() {
        let state = GridListState::default();
        let query = state.to_query();
        assert_eq!(query.search, None);
        assert_eq!(query.page, Some(1));
        assert_eq!(query.per_page, Some(DEFAULT_PAGE_SIZE));

        let mut state = GridListState::default();
        state.set_search("x");
        assert_eq!(state.to_query().search.as_deref(), Some("x"));
    }
}
