//! Боковое меню

use crate::layout::global_context::{AppGlobalContext, Page};
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuItem {
    label: &'static str,
    icon: &'static str,
    page: Page,
}

fn get_menu_items() -> Vec<MenuItem> {
    vec![
        MenuItem {
            label: "Сетки контента",
            icon: "grid",
            page: Page::GridList,
        },
        MenuItem {
            label: "Новая сетка",
            icon: "plus",
            page: Page::GridDetails { id: None },
        },
    ]
}

/// Пункт активен и для списка, и для открытой из него карточки
fn is_active(item: &Page, current: &Page) -> bool {
    match (item, current) {
        (Page::GridList, Page::GridList) => true,
        (Page::GridList, Page::GridDetails { id: Some(_) }) => true,
        (a, b) => a == b,
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div class="app-sidebar__content">
            {get_menu_items().into_iter().map(|item| {
                let page_for_class = item.page.clone();
                let page_for_click = item.page.clone();
                view! {
                    <div
                        class="app-sidebar__item"
                        class:app-sidebar__item--active=move || ctx.page.with(|p| is_active(&page_for_class, p))
                        style:padding-left="12px"
                        on:click=move |_| {
                            ctx.open(page_for_click.clone());
                        }
                    >
                        <span class="app-sidebar__icon">{icon(item.icon)}</span>
                        <span class="app-sidebar__label">{item.label}</span>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_item_stays_active_on_details() {
        let list = Page::GridList;
        let existing = Page::GridDetails {
            id: Some("1".to_string()),
        };
        let new = Page::GridDetails { id: None };

        assert!(is_active(&list, &list));
        assert!(is_active(&list, &existing));
        assert!(!is_active(&list, &new));
        assert!(is_active(&new, &new));
        assert!(!is_active(&new, &existing));
    }
}
