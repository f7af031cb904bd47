use crate::shared::unsaved_guard::confirm_discard;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::window;

const LIST_KEY: &str = "grid_configuration";
const DETAILS_KEY: &str = "grid_configuration_details";

/// Открытая страница приложения
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    GridList,
    /// `id == None` - создание новой конфигурации
    GridDetails { id: Option<String> },
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PageQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    active: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
}

impl Page {
    /// Разобрать строку запроса вида `?active=...&id=...`
    pub fn from_query(search: &str) -> Self {
        let query: PageQuery =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        match query.active.as_deref() {
            Some(DETAILS_KEY) => Page::GridDetails {
                id: query.id.filter(|id| !id.is_empty()),
            },
            _ => Page::GridList,
        }
    }

    pub fn to_query(&self) -> String {
        let query = match self {
            Page::GridList => PageQuery {
                active: Some(LIST_KEY.to_string()),
                id: None,
            },
            Page::GridDetails { id } => PageQuery {
                active: Some(DETAILS_KEY.to_string()),
                id: id.clone(),
            },
        };
        format!("?{}", serde_qs::to_string(&query).unwrap_or_default())
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::GridList => "Сетки контента",
            Page::GridDetails { id: None } => "Новая сетка",
            Page::GridDetails { id: Some(_) } => "Редактирование сетки",
        }
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub page: RwSignal<Page>,
    pub left_open: RwSignal<bool>,
    /// В открытой форме есть несохранённые данные
    pub dirty: RwSignal<bool>,
    /// Увеличивается после каждого сохранения; списки перечитывают данные
    pub grid_list_revision: RwSignal<u64>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            page: RwSignal::new(Page::default()),
            left_open: RwSignal::new(true),
            dirty: RwSignal::new(false),
            grid_list_revision: RwSignal::new(0),
        }
    }

    pub fn init_router_integration(&self) {
        let search = current_search();
        self.page.set(Page::from_query(&search));

        let this = *self;
        let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            let target = Page::from_query(&current_search());
            if this.dirty.get_untracked() && !confirm_discard() {
                // Пользователь остался на странице: возвращаем её адрес в историю
                let current = this.page.get_untracked();
                push_url(&current.to_query());
                return;
            }
            this.dirty.set(false);
            this.page.set(target);
        }) as Box<dyn FnMut(_)>);

        if let Some(w) = window() {
            let _ = w.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
            // MainLayout живёт всё время работы приложения
            closure.forget();
        }
    }

    /// Перейти на страницу. Возвращает `false`, если пользователь
    /// отказался терять несохранённые изменения.
    pub fn open(&self, page: Page) -> bool {
        if self.page.with_untracked(|current| *current == page) {
            return true;
        }
        if self.dirty.get_untracked() && !confirm_discard() {
            return false;
        }
        log::debug!("open page: {:?}", page);
        self.dirty.set(false);
        push_url(&page.to_query());
        self.page.set(page);
        true
    }

    /// Заменить адрес текущей страницы без записи в историю (после создания записи)
    pub fn replace(&self, page: Page) {
        replace_url(&page.to_query());
        self.page.set(page);
    }

    pub fn invalidate_grid_lists(&self) {
        self.grid_list_revision.update(|rev| *rev += 1);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

fn current_search() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

fn push_url(url: &str) {
    if current_search() == url {
        return;
    }
    if let Some(history) = window().and_then(|w| w.history().ok()) {
        let _ = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(url));
    }
}

fn replace_url(url: &str) {
    if let Some(history) = window().and_then(|w| w.history().ok()) {
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(url));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_from_query() {
        assert_eq!(Page::from_query(""), Page::GridList);
        assert_eq!(Page::from_query("?active=grid_configuration"), Page::GridList);
        assert_eq!(Page::from_query("?active=unknown"), Page::GridList);
        assert_eq!(
            Page::from_query("?active=grid_configuration_details"),
            Page::GridDetails { id: None }
        );
        assert_eq!(
            Page::from_query("?active=grid_configuration_details&id=abc"),
            Page::GridDetails {
                id: Some("abc".to_string())
            }
        );
        assert_eq!(
            Page::from_query("?active=grid_configuration_details&id="),
            Page::GridDetails { id: None }
        );
    }

    #[test]
    fn test_page_query_round_trip() {
        let pages = [
            Page::GridList,
            Page::GridDetails { id: None },
            Page::GridDetails {
                id: Some("0b6c5a1e-2f43-4c1a-9a55-41f0a9d1c111".to_string()),
            },
        ];
        for page in pages {
            assert_eq!(Page::from_query(&page.to_query()), page);
        }
    }
}
