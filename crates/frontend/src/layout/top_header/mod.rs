//! Верхняя панель: переключатель меню, заголовок страницы, пользователь и выход.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use contracts::system::auth::UserInfo;
use leptos::prelude::*;

/// ФИО, если задано, иначе логин
fn user_label(user: Option<&UserInfo>) -> String {
    match user {
        Some(u) => u
            .full_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(u.username.as_str())
            .to_string(),
        None => "Гость".to_string(),
    }
}

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, set_auth_state) = use_auth();

    let toggle_sidebar = move |_| {
        ctx.toggle_left();
    };

    let logout = move |_| {
        if ctx.dirty.get_untracked() && !crate::shared::unsaved_guard::confirm_discard() {
            return;
        }
        ctx.dirty.set(false);
        do_logout(set_auth_state);
    };

    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=toggle_sidebar
                    title=move || if is_sidebar_visible() { "Скрыть навигацию" } else { "Показать навигацию" }
                >
                    {move || if is_sidebar_visible() {
                        icon("panel-left-close")
                    } else {
                        icon("panel-left-open")
                    }}
                </button>
                <span class="top-header__title">"Shopdesk"</span>
                <span class="top-header__page">{move || ctx.page.with(|p| p.title())}</span>
                <Show when=move || ctx.dirty.get()>
                    <span class="top-header__dirty" title="Есть несохранённые изменения">"●"</span>
                </Show>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    {icon("user")}
                    <span>{move || auth_state.with(|s| user_label(s.user_info.as_ref()))}</span>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Выход">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(full_name: Option<&str>) -> UserInfo {
        UserInfo {
            id: "1".to_string(),
            username: "admin".to_string(),
            full_name: full_name.map(str::to_string),
            is_admin: true,
        }
    }

    #[test]
    fn test_user_label() {
        assert_eq!(user_label(None), "Гость");
        assert_eq!(user_label(Some(&user(None))), "admin");
        assert_eq!(user_label(Some(&user(Some("  ")))), "admin");
        assert_eq!(user_label(Some(&user(Some("Администратор")))), "Администратор");
    }
}
