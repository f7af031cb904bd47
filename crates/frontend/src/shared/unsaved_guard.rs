//! Предупреждение о несохранённых изменениях при уходе со страницы.
//!
//! Грязной форма считается, если в ней хоть что-то заполнено; сравнения
//! с сохранённой версией нет.

use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

const DISCARD_PROMPT: &str = "Есть несохранённые изменения. Уйти со страницы?";

/// Спросить пользователя, можно ли потерять изменения
pub fn confirm_discard() -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(DISCARD_PROMPT).ok())
        .unwrap_or(true)
}

/// Закрытие вкладки или перезагрузка при `ctx.dirty` вызывает системный диалог браузера
pub fn install_unsaved_guard(ctx: AppGlobalContext) {
    let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
        if !ctx.dirty.get_untracked() {
            return;
        }
        event.prevent_default();
        if let Some(event) = event.dyn_ref::<web_sys::BeforeUnloadEvent>() {
            event.set_return_value(DISCARD_PROMPT);
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(window) = web_sys::window() {
        let _ = window
            .add_event_listener_with_callback("beforeunload", closure.as_ref().unchecked_ref());
        // Слушатель живёт всё время работы приложения
        closure.forget();
    }
}
