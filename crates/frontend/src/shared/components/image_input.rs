//! Выбор изображения с превью. Файл не загружается сразу,
//! он отдаётся наверх и отправляется на сервер при сохранении формы.

use crate::shared::api_utils::asset_url;
use crate::shared::icons::icon;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{File, HtmlInputElement, Url};

fn revoke(url: Option<String>) {
    if let Some(url) = url {
        let _ = Url::revoke_object_url(&url);
    }
}

#[component]
pub fn ImageInput(
    label: &'static str,
    /// URL уже размещённого изображения
    #[prop(into)]
    hosted: Signal<Option<String>>,
    /// Для слота выбран локальный файл
    #[prop(into)]
    has_file: Signal<bool>,
    on_select: Callback<File>,
    on_clear: Callback<()>,
    #[prop(optional)]
    compact: bool,
) -> impl IntoView {
    let preview = RwSignal::new(None::<String>);
    on_cleanup(move || revoke(preview.get_untracked()));

    let handle_change = move |ev: leptos::ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        let file = input.files().and_then(|files| files.get(0));
        // Чтобы повторный выбор того же файла снова вызвал change
        input.set_value("");
        if let Some(file) = file {
            let url = Url::create_object_url_with_blob(&file).ok();
            revoke(preview.get_untracked());
            preview.set(url);
            on_select.run(file);
        }
    };

    let shown = move || {
        if has_file.get() {
            preview.get()
        } else {
            hosted.get().map(|url| asset_url(&url))
        }
    };

    view! {
        <div class="image-input" class:image-input--compact=compact>
            <span class="image-input__label">{label}</span>
            <div class="image-input__preview">
                {move || match shown() {
                    Some(src) => view! { <img src=src alt=label /> }.into_any(),
                    None => view! { <div class="image-input__placeholder">{icon("image")}</div> }.into_any(),
                }}
            </div>
            <div class="image-input__actions">
                <label class="button button--secondary image-input__choose">
                    {icon("download")}
                    {move || if shown().is_some() { "Заменить" } else { "Выбрать" }}
                    <input type="file" accept="image/*" style="display: none;" on:change=handle_change />
                </label>
                <Show when=move || shown().is_some()>
                    <button
                        class="button button--secondary"
                        title="Убрать изображение"
                        on:click=move |_| on_clear.run(())
                    >
                        {icon("x")}
                    </button>
                </Show>
            </div>
        </div>
    }
}
