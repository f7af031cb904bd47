//! Выбор элемента каталога для ячейки сетки: поиск с задержкой и
//! подгрузка следующих страниц при прокрутке списка.

use crate::domain::a002_content_entity::api::ContentApi;
use crate::shared::api_utils::asset_url;
use crate::shared::debounce::Debouncer;
use crate::shared::icons::icon;
use contracts::domain::a002_content_entity::aggregate::{ContentEntity, ContentSelection};
use contracts::domain::a002_content_entity::selector::{
    ContentQuery, ContentSelectorState, SEARCH_DEBOUNCE_MS,
};
use contracts::enums::content_type::ContentType;
use leptos::prelude::*;
use thaw::{Button, ButtonAppearance};
use wasm_bindgen::JsCast;

#[component]
pub fn ContentPicker(
    content_type: ContentType,
    api: ContentApi,
    on_selected: Callback<ContentSelection>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let state = RwSignal::new(ContentSelectorState::new(content_type));
    let search_text = RwSignal::new(String::new());
    let debouncer = Debouncer::new(SEARCH_DEBOUNCE_MS);
    let api = StoredValue::new(api);

    // Ответ применяется, только если запрос всё ещё актуален
    let run_query = move |query: ContentQuery| {
        let api = api.get_value();
        wasm_bindgen_futures::spawn_local(async move {
            let result = api.list(content_type, &query).await;
            state.try_update(|s| match result {
                Ok(page) => {
                    if !s.apply_page(&query, page) {
                        log::debug!("stale content page ignored: {:?}", query);
                    }
                }
                Err(e) => s.apply_error(&query, e),
            });
        });
    };

    let start_search = move |term: String| {
        if let Some(query) = state.try_update(|s| s.begin_search(&term)) {
            run_query(query);
        }
    };

    start_search(String::new());

    let handle_input = move |ev: leptos::ev::Event| {
        let term = event_target_value(&ev);
        search_text.set(term.clone());
        debouncer.call(move || start_search(term));
    };

    let load_more = move || {
        if let Some(query) = state.try_update(|s| s.request_next_page()).flatten() {
            run_query(query);
        }
    };

    let handle_scroll = move |ev: leptos::ev::Event| {
        let Some(el) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        else {
            return;
        };
        let near_bottom = state.with_untracked(|s| {
            s.should_load_more(
                el.scroll_top() as f64,
                el.client_height() as f64,
                el.scroll_height() as f64,
            )
        });
        if near_bottom {
            load_more();
        }
    };

    let select = move |entity: &ContentEntity| {
        debouncer.cancel();
        on_selected.run(ContentSelection::from_entity(content_type, entity));
    };

    view! {
        <div class="picker-container content-picker">
            <div class="picker-header">
                <h3>{format!("Выбор: {}", content_type.display_name())}</h3>
            </div>

            <div class="picker-search">
                {icon("search")}
                <input
                    type="text"
                    placeholder="Поиск по названию"
                    prop:value=move || search_text.get()
                    on:input=handle_input
                />
            </div>

            {move || state.with(|s| s.error.clone()).map(|e| view! { <div class="error">{e}</div> })}

            <div class="picker-content" style="max-height: 420px; overflow-y: auto;" on:scroll=handle_scroll>
                <div class="picker-list">
                    {move || state.with(|s| s.items.clone()).into_iter().map(|entity| {
                        let image = entity.image.clone();
                        let name = entity.name.clone();
                        let slug = entity.slug.clone();
                        view! {
                            <div class="picker-item" on:click=move |_| select(&entity)>
                                <div class="picker-item-logo">
                                    {match image {
                                        Some(src) => view! { <img src=asset_url(&src) alt=name.clone() /> }.into_any(),
                                        None => view! { <div class="picker-item-icon">{icon("image")}</div> }.into_any(),
                                    }}
                                </div>
                                <div class="picker-item-description">{name}</div>
                                <div class="picker-item-code">{slug}</div>
                            </div>
                        }
                    }).collect_view()}
                </div>

                <Show when=move || state.with(|s| s.loading)>
                    <div class="picker-loading">"Загрузка..."</div>
                </Show>
                <Show when=move || state.with(|s| !s.loading && s.items.is_empty() && s.error.is_none())>
                    <div class="picker-empty">"Ничего не найдено"</div>
                </Show>
                <Show when=move || state.with(|s| !s.loading && s.has_more())>
                    <button class="button button--secondary picker-more" on:click=move |_| load_more()>
                        "Загрузить ещё"
                    </button>
                </Show>
            </div>

            <div class="picker-actions">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| {
                        debouncer.cancel();
                        on_cancel.run(());
                    }
                >
                    "Отмена"
                </Button>
            </div>
        </div>
    }
}
