use super::view_model::{DimensionField, GridDetailsViewModel};
use crate::domain::a001_grid_configuration::api::GridConfigurationApi;
use crate::domain::a002_content_entity::api::ContentApi;
use crate::domain::a002_content_entity::ui::picker::ContentPicker;
use crate::layout::global_context::{AppGlobalContext, Page};
use crate::shared::api_utils::asset_url;
use crate::shared::components::image_input::ImageInput;
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::toast::{use_toast, ToastService};
use crate::system::auth::context::use_api_client;
use contracts::domain::a001_grid_configuration::editor::{GridItemId, ImageSlot};
use contracts::enums::content_type::ContentType;
use contracts::enums::keyword::Keyword;
use leptos::prelude::*;
use thaw::{Button, ButtonAppearance};
use web_sys::File;

const DIMENSION_FIELDS: [DimensionField; 4] = [
    DimensionField::Rows,
    DimensionField::Columns,
    DimensionField::MobileRows,
    DimensionField::MobileColumns,
];

#[component]
pub fn GridConfigurationDetails(id: Option<String>) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let toast = use_toast();
    let client = use_api_client();
    let api = StoredValue::new(GridConfigurationApi::new(client.clone()));
    let content_api = StoredValue::new(ContentApi::new(client));

    let vm = GridDetailsViewModel::new();
    vm.load_if_needed(id, api.get_value());

    Effect::new(move |_| {
        let dirty = vm.is_dirty();
        if ctx.dirty.get_untracked() != dirty {
            ctx.dirty.set(dirty);
        }
    });
    on_cleanup(move || {
        ctx.dirty.try_set(false);
    });

    let open_picker = move |cell: GridItemId| {
        let content_type = vm.editor.with_untracked(|e| e.content_type());
        let content_api = content_api.get_value();
        modal_stack.push_with_frame(
            Some("max-width: min(720px, 95vw); width: min(720px, 95vw);".to_string()),
            None,
            move |handle| {
                let handle_selected = handle.clone();
                view! {
                    <ContentPicker
                        content_type=content_type
                        api=content_api.clone()
                        on_selected=Callback::new(move |selection| {
                            handle_selected.close();
                            vm.assign_content(cell, selection, toast);
                        })
                        on_cancel=Callback::new(move |_| handle.close())
                    />
                }
                .into_any()
            },
        );
    };

    let draft_dims = move || vm.editor.with(|e| e.draft_dimensions());
    let totals_mismatch = move || {
        let dims = draft_dims();
        dims.desktop_total() != dims.mobile_total()
    };

    view! {
        <div class="details-container grid-details">
            <div class="details-header">
                <h3>{move || if vm.is_edit_mode() { "Редактирование сетки" } else { "Новая сетка" }}</h3>
                <div class="details-header__actions">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| vm.save_command(api.get_value(), ctx, toast)
                        disabled=Signal::derive(move || vm.saving.get() || vm.loading.get())
                    >
                        {icon("save")}
                        {move || if vm.saving.get() { "Сохранение..." } else { "Сохранить" }}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| {
                            ctx.open(Page::GridList);
                        }
                    >
                        {icon("cancel")}
                        "Закрыть"
                    </Button>
                </div>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}
            <Show when=move || vm.loading.get()>
                <div class="details-loading">"Загрузка..."</div>
            </Show>

            <div class="details-form">
                <div class="form-group">
                    <label for="grid-title">"Заголовок"</label>
                    <input
                        type="text"
                        id="grid-title"
                        placeholder="Например: Популярные категории"
                        prop:value=move || vm.meta.with(|m| m.title.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            vm.update_meta(|m| m.title = value);
                        }
                    />
                </div>

                <div class="form-row">
                    <label class="form-check">
                        <input
                            type="checkbox"
                            prop:checked=move || vm.meta.with(|m| m.is_title_show)
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                vm.update_meta(|m| m.is_title_show = checked);
                            }
                        />
                        "Показывать заголовок"
                    </label>
                    <label class="form-check">
                        <input
                            type="checkbox"
                            prop:checked=move || vm.meta.with(|m| m.is_active)
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                vm.update_meta(|m| m.is_active = checked);
                            }
                        />
                        "Активна"
                    </label>
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="grid-keyword">"Раздел витрины"</label>
                        <select
                            id="grid-keyword"
                            prop:value=move || vm.meta.with(|m| m.keyword.code())
                            on:change=move |ev| {
                                if let Some(keyword) = Keyword::from_code(&event_target_value(&ev)) {
                                    vm.update_meta(|m| m.keyword = keyword);
                                }
                            }
                        >
                            {Keyword::all().into_iter().map(|k| view! {
                                <option value=k.code()>{k.display_name()}</option>
                            }).collect_view()}
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="grid-content-type">"Тип контента"</label>
                        <select
                            id="grid-content-type"
                            prop:value=move || vm.editor.with(|e| e.content_type().code())
                            on:change=move |ev| {
                                if let Some(ct) = ContentType::from_code(&event_target_value(&ev)) {
                                    vm.change_content_type(ct, modal_stack);
                                }
                            }
                        >
                            {ContentType::all().into_iter().map(|ct| view! {
                                <option value=ct.code()>{ct.display_name()}</option>
                            }).collect_view()}
                        </select>
                    </div>
                </div>

                <div class="grid-banners">
                    <SlotImage vm=vm slot=ImageSlot::Banner label="Баннер" toast=toast />
                    <SlotImage vm=vm slot=ImageSlot::BannerMobile label="Баннер (моб.)" toast=toast />
                    <SlotImage vm=vm slot=ImageSlot::Background label="Фон" toast=toast />
                </div>

                <div class="grid-dimensions">
                    {DIMENSION_FIELDS.into_iter().map(|field| view! {
                        <div class="form-group form-group--narrow">
                            <label>{field.label()}</label>
                            <input
                                type="number"
                                min="1"
                                max="12"
                                prop:value=move || field.get(&draft_dims()).to_string()
                                on:input=move |ev| vm.set_dimension(field, &event_target_value(&ev))
                            />
                        </div>
                    }).collect_view()}
                    <div class="grid-dimensions__totals" class:grid-dimensions__totals--error=totals_mismatch>
                        {move || {
                            let dims = draft_dims();
                            format!("Ячеек: ПК {} / моб. {}", dims.desktop_total(), dims.mobile_total())
                        }}
                    </div>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| vm.generate(modal_stack, toast)
                        disabled=Signal::derive(totals_mismatch)
                    >
                        {icon("grid")}
                        "Сгенерировать"
                    </Button>
                </div>
                <Show when=totals_mismatch>
                    <div class="warning">"Количество ячеек на ПК и в мобильной версии должно совпадать"</div>
                </Show>

                <h4>"Ячейки"</h4>
                <div
                    class="grid-editor"
                    style=move || {
                        let columns = vm.editor.with(|e| e.dimensions().columns).max(1);
                        format!("display: grid; grid-template-columns: repeat({}, minmax(0, 1fr)); gap: 12px;", columns)
                    }
                >
                    <For
                        each=move || vm.editor.with(|e| e.items().iter().map(|i| i.id).collect::<Vec<_>>())
                        key=|id| *id
                        children=move |id| view! {
                            <GridCell vm=vm id=id toast=toast on_pick=Callback::new(move |_| open_picker(id)) />
                        }
                    />
                </div>

                <h4>"Мобильная раскладка"</h4>
                <div
                    class="grid-mobile-preview"
                    style=move || {
                        let columns = vm.editor.with(|e| e.dimensions().mobile_columns).max(1);
                        format!("display: grid; grid-template-columns: repeat({}, 48px); gap: 4px;", columns)
                    }
                >
                    {move || vm.editor.with(|e| {
                        e.items()
                            .iter()
                            .map(|item| (item.position, e.is_populated(item)))
                            .collect::<Vec<_>>()
                    })
                    .into_iter()
                    .map(|(position, populated)| view! {
                        <div class="grid-mobile-preview__cell" class:grid-mobile-preview__cell--filled=populated>
                            {position + 1}
                        </div>
                    })
                    .collect_view()}
                </div>
            </div>
        </div>
    }
}

#[component]
fn SlotImage(
    vm: GridDetailsViewModel,
    slot: ImageSlot,
    label: &'static str,
    toast: ToastService,
    #[prop(optional)]
    compact: bool,
) -> impl IntoView {
    view! {
        <ImageInput
            label=label
            compact=compact
            hosted=Signal::derive(move || vm.editor.with(|e| e.hosted_image(slot).map(str::to_string)))
            has_file=Signal::derive(move || vm.editor.with(|e| e.files().contains(slot)))
            on_select=Callback::new(move |file: File| vm.set_image(slot, file, toast))
            on_clear=Callback::new(move |_| vm.clear_image(slot, toast))
        />
    }
}

#[component]
fn GridCell(
    vm: GridDetailsViewModel,
    id: GridItemId,
    toast: ToastService,
    on_pick: Callback<()>,
) -> impl IntoView {
    let item = move || vm.editor.with(|e| e.item(id).cloned());
    let position = move || item().map(|i| i.position + 1).unwrap_or_default();
    let name = move || item().map(|i| i.name).filter(|n| !n.is_empty());
    let link = move || item().map(|i| i.link).unwrap_or_default();
    let content_type = move || vm.editor.with(|e| e.content_type());

    view! {
        <div class="grid-cell">
            <div class="grid-cell__header">
                <span class="grid-cell__position">{position}</span>
                <span class="grid-cell__name">
                    {move || name().unwrap_or_else(|| "Пусто".to_string())}
                </span>
            </div>

            <SlotImage vm=vm slot=ImageSlot::Cell(id) label="Изображение" toast=toast compact=true />

            <div class="grid-cell__link">
                {icon("link")}
                <input
                    type="text"
                    placeholder="/product/..."
                    prop:value=link
                    on:change=move |ev| vm.set_cell_link(id, event_target_value(&ev), toast)
                />
                {move || item()
                    .and_then(|i| i.image)
                    .map(|src| view! { <a href=asset_url(&src) target="_blank" title="Открыть изображение">{icon("image")}</a> })}
            </div>

            <div class="grid-cell__actions">
                <button class="button button--secondary" on:click=move |_| on_pick.run(())>
                    {icon("search")}
                    {move || format!("Выбрать: {}", content_type().display_name())}
                </button>
                <button class="button button--icon" title="Очистить ячейку" on:click=move |_| vm.clear_cell(id, toast)>
                    {icon("delete")}
                </button>
            </div>
        </div>
    }
}
