pub mod state;

use self::state::{create_state, ReorderGate};
use crate::domain::a001_grid_configuration::api::GridConfigurationApi;
use crate::domain::a002_content_entity::api::ContentApi;
use crate::layout::global_context::{AppGlobalContext, Page};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::debounce::Debouncer;
use crate::shared::icons::icon;
use crate::shared::toast::use_toast;
use crate::system::auth::context::use_api_client;
use contracts::domain::a001_grid_configuration::aggregate::GridConfiguration;
use contracts::domain::a001_grid_configuration::reorder::{persist_reorder, ReorderPlan};
use contracts::domain::a002_content_entity::selector::SEARCH_DEBOUNCE_MS;
use contracts::enums::keyword::Keyword;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[derive(Clone, Debug, PartialEq)]
pub struct GridConfigurationRow {
    pub id: String,
    pub title: String,
    pub content_type: &'static str,
    pub keyword: &'static str,
    pub grid: String,
    pub is_active: bool,
    pub updated_at: String,
}

impl From<&GridConfiguration> for GridConfigurationRow {
    fn from(c: &GridConfiguration) -> Self {
        Self {
            id: c.to_string_id(),
            title: c.title.clone(),
            content_type: c.content_type.display_name(),
            keyword: c.keyword.display_name(),
            grid: format!(
                "{}×{} / {}×{}",
                c.grid.rows, c.grid.columns, c.grid.mobile_rows, c.grid.mobile_columns
            ),
            is_active: c.is_active,
            updated_at: c.metadata.updated_at.format("%d.%m.%Y %H:%M").to_string(),
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn GridConfigurationList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toast = use_toast();
    let client = use_api_client();
    let api = StoredValue::new(GridConfigurationApi::new(client.clone()));
    let content_api = StoredValue::new(ContentApi::new(client));

    let state = create_state();
    let items = RwSignal::new(Vec::<GridConfiguration>::new());
    let total = RwSignal::new(0u64);
    let total_pages = RwSignal::new(0u64);
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let reload = RwSignal::new(0u64);
    let search_text = RwSignal::new(String::new());
    let search_debouncer = Debouncer::new(SEARCH_DEBOUNCE_MS);

    let dragging = RwSignal::new(None::<usize>);
    let drag_over = RwSignal::new(None::<usize>);
    let reorder_gate = RwSignal::new(ReorderGate::default());

    // Перечитываем при смене фильтров, после сохранений и по кнопке «Обновить»
    Effect::new(move |_| {
        let query = state.with(|s| s.to_query());
        ctx.grid_list_revision.track();
        reload.track();

        let api = api.get_value();
        loading.set(true);
        spawn_local(async move {
            match api.list(&query).await {
                Ok(page) => {
                    items.try_set(page.items);
                    total.try_set(page.total);
                    total_pages.try_set(page.total_pages);
                    error.try_set(None);
                }
                Err(e) => {
                    error.try_set(Some(e));
                }
            }
            loading.try_set(false);
        });
    });

    let refresh = move || reload.update(|r| *r += 1);

    let handle_search = move |ev: leptos::ev::Event| {
        let term = event_target_value(&ev);
        search_text.set(term.clone());
        search_debouncer.call(move || {
            state.try_update(|s| s.set_search(&term));
        });
    };

    let handle_keyword = move |ev: leptos::ev::Event| {
        let keyword = Keyword::from_code(&event_target_value(&ev));
        state.update(|s| s.set_keyword(keyword));
    };

    let open_details = move |id: Option<String>| {
        ctx.open(Page::GridDetails { id });
    };

    let toggle_active = move |id: String, is_active: bool| {
        let api = api.get_value();
        spawn_local(async move {
            match api.set_active(&id, is_active).await {
                Ok(()) => {
                    items.try_update(|list| {
                        if let Some(c) = list.iter_mut().find(|c| c.to_string_id() == id) {
                            c.is_active = is_active;
                        }
                    });
                }
                Err(e) => {
                    toast.error(format!("Не удалось изменить активность: {}", e));
                    refresh();
                }
            }
        });
    };

    let delete_item = move |id: String, title: String| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!("Удалить сетку «{}»?", title))
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        let api = api.get_value();
        spawn_local(async move {
            match api.delete(&id).await {
                Ok(()) => {
                    toast.success("Сетка удалена");
                    ctx.invalidate_grid_lists();
                }
                Err(e) => toast.error(format!("Ошибка удаления: {}", e)),
            }
        });
    };

    let fill_catalog = move || {
        let content_api = content_api.get_value();
        spawn_local(async move {
            match content_api.insert_test_data().await {
                Ok(()) => toast.success("Демо-каталог заполнен"),
                Err(e) => toast.error(format!("Ошибка заполнения: {}", e)),
            }
        });
    };

    // Новый порядок показываем сразу, при ошибке сохранения возвращаем прежний
    let handle_drop = move |to: usize| {
        let from = dragging.get_untracked();
        dragging.set(None);
        drag_over.set(None);
        let Some(from) = from else {
            return;
        };
        let Some(plan) = items.with_untracked(|list| ReorderPlan::new(list, from, to)) else {
            return;
        };
        if !reorder_gate.try_update(|g| g.begin()).unwrap_or(false) {
            return;
        }
        items.set(plan.reordered.clone());

        let api = api.get_value();
        spawn_local(async move {
            if let Err((snapshot, e)) = persist_reorder(plan, &api).await {
                items.try_set(snapshot);
                toast.error(format!("Не удалось сохранить порядок: {}", e));
            }
            reorder_gate.try_update(|g| g.finish());
        });
    };

    view! {
        <div class="content">
            <div class="header">
                <h2>{"Сетки контента"}</h2>
                <div class="header__actions">
                    <button class="button button--primary" on:click=move |_| open_details(None)>
                        {icon("plus")}
                        {"Новая сетка"}
                    </button>
                    <button class="button button--secondary" on:click=move |_| fill_catalog()>
                        {icon("download")}
                        {"Демо-каталог"}
                    </button>
                    <button class="button button--secondary" on:click=move |_| refresh()>
                        {icon("refresh")}
                        {"Обновить"}
                    </button>
                </div>
            </div>

            <div class="filter-panel">
                <div class="filter-panel__search">
                    {icon("search")}
                    <input
                        type="text"
                        placeholder="Поиск по заголовку"
                        prop:value=move || search_text.get()
                        on:input=handle_search
                    />
                </div>
                <select
                    class="filter-panel__select"
                    on:change=handle_keyword
                    prop:value=move || state.with(|s| s.keyword.map(|k| k.code()).unwrap_or(""))
                >
                    <option value="">"Все разделы"</option>
                    {Keyword::all().into_iter().map(|k| view! {
                        <option value=k.code()>{k.display_name()}</option>
                    }).collect_view()}
                </select>
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="table-container">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell table__header-cell--handle"></th>
                            <th class="table__header-cell">"Заголовок"</th>
                            <th class="table__header-cell">"Тип контента"</th>
                            <th class="table__header-cell">"Раздел"</th>
                            <th class="table__header-cell">"Сетка (ПК / моб.)"</th>
                            <th class="table__header-cell">"Активна"</th>
                            <th class="table__header-cell">"Изменена"</th>
                            <th class="table__header-cell"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || items.get().iter().map(GridConfigurationRow::from).enumerate().map(|(index, row)| {
                            let id_for_click = row.id.clone();
                            let id_for_toggle = row.id.clone();
                            let id_for_delete = row.id.clone();
                            let title_for_delete = row.title.clone();
                            view! {
                                <tr
                                    class="table__row"
                                    class:table__row--dragging=move || dragging.get() == Some(index)
                                    class:table__row--drag-over=move || drag_over.get() == Some(index)
                                    draggable=move || if reorder_gate.with(|g| g.can_drag()) { "true" } else { "false" }
                                    on:dragstart=move |ev: leptos::ev::DragEvent| {
                                        if !reorder_gate.with_untracked(|g| g.can_drag()) {
                                            ev.prevent_default();
                                            return;
                                        }
                                        if let Some(dt) = ev.data_transfer() {
                                            dt.set_effect_allowed("move");
                                            let _ = dt.set_data("text/plain", &index.to_string());
                                        }
                                        dragging.set(Some(index));
                                    }
                                    on:dragover=move |ev: leptos::ev::DragEvent| {
                                        ev.prevent_default();
                                        if drag_over.get_untracked() != Some(index) {
                                            drag_over.set(Some(index));
                                        }
                                    }
                                    on:dragend=move |_| {
                                        dragging.set(None);
                                        drag_over.set(None);
                                    }
                                    on:drop=move |ev: leptos::ev::DragEvent| {
                                        ev.prevent_default();
                                        handle_drop(index);
                                    }
                                    on:dblclick=move |_| open_details(Some(id_for_click.clone()))
                                >
                                    <td class="table__cell table__cell--handle" title="Перетащите для изменения порядка">
                                        {icon("grip")}
                                    </td>
                                    <td class="table__cell">{row.title}</td>
                                    <td class="table__cell">{row.content_type}</td>
                                    <td class="table__cell">{row.keyword}</td>
                                    <td class="table__cell">{row.grid}</td>
                                    <td class="table__cell">
                                        <input
                                            type="checkbox"
                                            class="table__checkbox"
                                            prop:checked=row.is_active
                                            on:click=|ev: leptos::ev::MouseEvent| ev.stop_propagation()
                                            on:change=move |ev| {
                                                toggle_active(id_for_toggle.clone(), event_target_checked(&ev));
                                            }
                                        />
                                    </td>
                                    <td class="table__cell">{row.updated_at}</td>
                                    <td class="table__cell table__cell--actions">
                                        <button
                                            class="button button--icon"
                                            title="Редактировать"
                                            on:click={
                                                let id = row.id.clone();
                                                move |_| open_details(Some(id.clone()))
                                            }
                                        >
                                            {icon("edit")}
                                        </button>
                                        <button
                                            class="button button--icon"
                                            title="Удалить"
                                            on:click=move |_| delete_item(id_for_delete.clone(), title_for_delete.clone())
                                        >
                                            {icon("delete")}
                                        </button>
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
                <Show when=move || !loading.get() && items.with(|i| i.is_empty())>
                    <div class="table__empty">"Нет ни одной сетки"</div>
                </Show>
            </div>

            <PaginationControls
                current_page=Signal::derive(move || state.with(|s| s.page))
                total_pages=Signal::derive(move || total_pages.get())
                total_count=Signal::derive(move || total.get())
                page_size=Signal::derive(move || state.with(|s| s.per_page))
                on_page_change=Callback::new(move |page| state.update(|s| s.page = page))
                on_page_size_change=Callback::new(move |size| state.update(|s| s.set_per_page(size)))
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_grid_configuration::aggregate::{
        GridConfigurationDto, GridDimensions,
    };
    use contracts::enums::content_type::ContentType;

    #[test]
    fn test_row_from_configuration() {
        let dto = GridConfigurationDto {
            title: "Хиты продаж".to_string(),
            content_type: ContentType::Brand,
            grid: GridDimensions::new(3, 2, 2, 3),
            is_active: true,
            keyword: Keyword::Cart,
            ..Default::default()
        };
        let config = GridConfiguration::new_for_insert(&dto, 5);
        let row = GridConfigurationRow::from(&config);

        assert_eq!(row.id, config.to_string_id());
        assert_eq!(row.title, "Хиты продаж");
        assert_eq!(row.content_type, "Бренды");
        assert_eq!(row.keyword, "Корзина");
        assert_eq!(row.grid, "3×2 / 2×3");
        assert!(row.is_active);
    }
}
