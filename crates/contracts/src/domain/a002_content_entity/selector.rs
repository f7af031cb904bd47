//! Состояние пикера контента: поиск с подгрузкой страниц при прокрутке.
//!
//! Сетевые запросы не отменяются. Ответ на устаревший поисковый запрос
//! просто не применяется к состоянию.

use serde::{Deserialize, Serialize};

use super::aggregate::ContentEntity;
use crate::enums::content_type::ContentType;
use crate::shared::api_response::Paginated;

pub const DEFAULT_PER_PAGE: u64 = 20;
/// Расстояние до низа списка, при котором подгружается следующая страница
pub const LOAD_MORE_THRESHOLD_PX: f64 = 50.0;
/// Задержка перед поиском после последнего нажатия клавиши
pub const SEARCH_DEBOUNCE_MS: u32 = 500;

/// Параметры запроса списка контента
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentQuery {
    pub page: u64,
    pub per_page: u64,
    #[serde(default)]
    pub search: String,
}

impl Default for ContentQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            search: String::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContentSelectorState {
    pub content_type: ContentType,
    pub search: String,
    pub items: Vec<ContentEntity>,
    pub loading: bool,
    pub error: Option<String>,
    per_page: u64,
    loaded_page: u64,
    total_pages: u64,
}

impl ContentSelectorState {
    pub fn new(content_type: ContentType) -> Self {
        Self {
            content_type,
            search: String::new(),
            items: Vec::new(),
            loading: false,
            error: None,
            per_page: DEFAULT_PER_PAGE,
            loaded_page: 0,
            total_pages: 0,
        }
    }

    pub fn has_more(&self) -> bool {
        self.loaded_page < self.total_pages
    }

    /// Начать новый поиск: список сбрасывается, возвращается запрос первой страницы
    pub fn begin_search(&mut self, term: &str) -> ContentQuery {
        self.search = term.trim().to_string();
        self.items.clear();
        self.loaded_page = 0;
        self.total_pages = 0;
        self.loading = true;
        self.error = None;
        ContentQuery {
            page: 1,
            per_page: self.per_page,
            search: self.search.clone(),
        }
    }

    /// Запрос следующей страницы, если она есть и ничего не грузится
    pub fn request_next_page(&mut self) -> Option<ContentQuery> {
        if self.loading || !self.has_more() {
            return None;
        }
        self.loading = true;
        Some(ContentQuery {
            page: self.loaded_page + 1,
            per_page: self.per_page,
            search: self.search.clone(),
        })
    }

    /// Применить полученную страницу. Возвращает `false`, если ответ устарел.
    pub fn apply_page(&mut self, query: &ContentQuery, page: Paginated<ContentEntity>) -> bool {
        if query.search != self.search || query.page != self.loaded_page + 1 {
            return false;
        }
        self.items.extend(page.items);
        self.loaded_page = query.page;
        self.total_pages = page.total_pages;
        self.loading = false;
        true
    }

    pub fn apply_error(&mut self, query: &ContentQuery, error: String) {
        if query.search != self.search {
            return;
        }
        self.loading = false;
        self.error = Some(error);
    }

    /// Пользователь докрутил почти до конца списка
    pub fn should_load_more(&self, scroll_top: f64, client_height: f64, scroll_height: f64) -> bool {
        self.has_more()
            && !self.loading
            && scroll_top + client_height >= scroll_height - LOAD_MORE_THRESHOLD_PX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(from: usize, count: usize) -> Vec<ContentEntity> {
        (from..from + count)
            .map(|i| ContentEntity {
                id: i.to_string(),
                content_type: ContentType::Product,
                name: format!("Товар {i}"),
                slug: format!("item-{i}"),
                image: None,
                parent_slug: None,
            })
            .collect()
    }

    #[test]
    fn test_pages_accumulate_in_order() {
        let mut state = ContentSelectorState::new(ContentType::Product);
        let q1 = state.begin_search("");
        assert!(state.apply_page(&q1, Paginated::new(entities(0, 20), 1, 20, 45)));
        assert!(state.has_more());

        let q2 = state.request_next_page().unwrap();
        assert_eq!(q2.page, 2);
        assert!(state.request_next_page().is_none());
        assert!(state.apply_page(&q2, Paginated::new(entities(20, 20), 2, 20, 45)));

        let q3 = state.request_next_page().unwrap();
        assert!(state.apply_page(&q3, Paginated::new(entities(40, 5), 3, 20, 45)));
        assert_eq!(state.items.len(), 45);
        assert_eq!(state.items[44].id, "44");
        assert!(!state.has_more());
        assert!(state.request_next_page().is_none());
    }

    #[test]
    fn test_stale_search_response_ignored() {
        let mut state = ContentSelectorState::new(ContentType::Brand);
        let old = state.begin_search("ni");
        let current = state.begin_search("nike");
        assert!(!state.apply_page(&old, Paginated::new(entities(0, 3), 1, 20, 3)));
        assert!(state.items.is_empty());
        assert!(state.loading);
        assert!(state.apply_page(&current, Paginated::new(entities(0, 1), 1, 20, 1)));
        assert_eq!(state.items.len(), 1);
        assert!(!state.loading);
    }

    #[test]
    fn test_duplicate_page_ignored() {
        let mut state = ContentSelectorState::new(ContentType::Product);
        let q = state.begin_search("a");
        assert!(state.apply_page(&q, Paginated::new(entities(0, 20), 1, 20, 40)));
        assert!(!state.apply_page(&q, Paginated::new(entities(0, 20), 1, 20, 40)));
        assert_eq!(state.items.len(), 20);
    }

    #[test]
    fn test_should_load_more_near_bottom() {
        let mut state = ContentSelectorState::new(ContentType::Product);
        let q = state.begin_search("");
        assert!(!state.should_load_more(950.0, 100.0, 1000.0));
        state.apply_page(&q, Paginated::new(entities(0, 20), 1, 20, 40));
        assert!(state.should_load_more(860.0, 100.0, 1000.0));
        assert!(!state.should_load_more(100.0, 100.0, 1000.0));
    }

    #[test]
    fn test_error_clears_loading() {
        let mut state = ContentSelectorState::new(ContentType::Product);
        let q = state.begin_search("x");
        state.apply_error(&q, "HTTP 500".into());
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("HTTP 500"));
    }
}
