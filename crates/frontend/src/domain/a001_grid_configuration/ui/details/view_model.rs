use crate::domain::a001_grid_configuration::api::GridConfigurationApi;
use crate::layout::global_context::{AppGlobalContext, Page};
use crate::shared::components::confirm_dialog::confirm_dialog;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::toast::ToastService;
use contracts::domain::a001_grid_configuration::aggregate::GridDimensions;
use contracts::domain::a001_grid_configuration::editor::{
    GridEditor, GridFormMeta, GridItemId, ImageSlot, PendingTransition, Transition,
};
use contracts::domain::a001_grid_configuration::error::GridError;
use contracts::domain::a001_grid_configuration::save::{save_configuration, SaveOutcome};
use contracts::domain::a002_content_entity::aggregate::ContentSelection;
use contracts::enums::content_type::ContentType;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::File;

/// Поле размера сетки в форме
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionField {
    Rows,
    Columns,
    MobileRows,
    MobileColumns,
}

impl DimensionField {
    pub fn label(&self) -> &'static str {
        match self {
            DimensionField::Rows => "Строки (ПК)",
            DimensionField::Columns => "Колонки (ПК)",
            DimensionField::MobileRows => "Строки (моб.)",
            DimensionField::MobileColumns => "Колонки (моб.)",
        }
    }

    pub fn get(&self, dims: &GridDimensions) -> u32 {
        match self {
            DimensionField::Rows => dims.rows,
            DimensionField::Columns => dims.columns,
            DimensionField::MobileRows => dims.mobile_rows,
            DimensionField::MobileColumns => dims.mobile_columns,
        }
    }

    pub fn apply(&self, dims: GridDimensions, value: u32) -> GridDimensions {
        let mut dims = dims;
        match self {
            DimensionField::Rows => dims.rows = value,
            DimensionField::Columns => dims.columns = value,
            DimensionField::MobileRows => dims.mobile_rows = value,
            DimensionField::MobileColumns => dims.mobile_columns = value,
        }
        dims
    }
}

/// Пустое или нечисловое поле превращается в 0, его отклонит проверка размеров
pub fn parse_dimension(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

/// Эвристика «есть что терять»: заполнено хоть что-то
pub fn has_unsaved_input<F>(meta: &GridFormMeta, editor: &GridEditor<F>) -> bool {
    !meta.title.trim().is_empty() || editor.has_content()
}

/// ViewModel конструктора сетки
#[derive(Clone, Copy)]
pub struct GridDetailsViewModel {
    pub meta: RwSignal<GridFormMeta>,
    /// `web_sys::File` не `Send`, поэтому локальное хранилище
    pub editor: RwSignal<GridEditor<File>, LocalStorage>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    /// Пользователь что-то менял после загрузки
    pub touched: RwSignal<bool>,
}

impl GridDetailsViewModel {
    pub fn new() -> Self {
        Self {
            meta: RwSignal::new(GridFormMeta::default()),
            editor: RwSignal::new_local(GridEditor::new()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
            touched: RwSignal::new(false),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.meta.with(|m| m.id.is_some())
    }

    pub fn is_dirty(&self) -> bool {
        self.touched.get() && self.meta.with(|m| self.editor.with(|e| has_unsaved_input(m, e)))
    }

    pub fn load_if_needed(&self, id: Option<String>, api: GridConfigurationApi) {
        let Some(existing_id) = id else {
            return;
        };
        let vm = *self;
        vm.loading.set(true);
        spawn_local(async move {
            match api.get_by_id(&existing_id).await {
                Ok(config) => {
                    vm.editor.try_set(GridEditor::from_configuration(&config));
                    vm.meta.try_set(GridFormMeta::from_configuration(&config));
                    vm.error.try_set(None);
                }
                Err(e) => {
                    vm.error.try_set(Some(format!("Ошибка загрузки: {}", e)));
                }
            }
            vm.loading.try_set(false);
        });
    }

    pub fn update_meta(&self, f: impl FnOnce(&mut GridFormMeta)) {
        self.meta.update(f);
        self.touched.set(true);
    }

    pub fn set_dimension(&self, field: DimensionField, raw: &str) {
        let value = parse_dimension(raw);
        self.editor.update(|e| {
            let dims = field.apply(e.draft_dimensions(), value);
            e.set_draft_dimensions(dims);
        });
        self.touched.set(true);
    }

    /// Перестроить сетку по размерам из формы
    pub fn generate(&self, modal_stack: ModalStackService, toast: ToastService) {
        match self.editor.try_update(|e| e.request_generate()) {
            Some(Ok(Transition::Applied)) => {
                self.touched.set(true);
                toast.info("Сетка перестроена");
            }
            Some(Ok(Transition::NeedsConfirmation(pending))) => self.ask(pending, modal_stack),
            Some(Ok(Transition::Unchanged)) | None => {}
            Some(Err(e)) => toast.error(e.to_string()),
        }
    }

    pub fn change_content_type(&self, content_type: ContentType, modal_stack: ModalStackService) {
        match self.editor.try_update(|e| e.request_content_type(content_type)) {
            Some(Transition::Applied) => self.touched.set(true),
            Some(Transition::NeedsConfirmation(pending)) => self.ask(pending, modal_stack),
            _ => {}
        }
    }

    fn ask(&self, pending: PendingTransition, modal_stack: ModalStackService) {
        let editor = self.editor;
        let touched = self.touched;
        confirm_dialog(
            modal_stack,
            pending.prompt(),
            move || {
                editor.update(|e| {
                    e.confirm();
                });
                touched.set(true);
            },
            move || editor.update(|e| e.cancel()),
        );
    }

    fn apply_cell(
        &self,
        toast: ToastService,
        f: impl FnOnce(&mut GridEditor<File>) -> Result<(), GridError>,
    ) {
        match self.editor.try_update(f) {
            Some(Ok(())) => self.touched.set(true),
            Some(Err(e)) => toast.error(e.to_string()),
            None => {}
        }
    }

    pub fn assign_content(&self, id: GridItemId, selection: ContentSelection, toast: ToastService) {
        self.apply_cell(toast, |e| e.assign_content(id, &selection));
    }

    pub fn set_cell_link(&self, id: GridItemId, link: String, toast: ToastService) {
        self.apply_cell(toast, |e| e.set_cell_link(id, &link));
    }

    pub fn clear_cell(&self, id: GridItemId, toast: ToastService) {
        self.apply_cell(toast, |e| e.clear_cell(id));
    }

    pub fn set_image(&self, slot: ImageSlot, file: File, toast: ToastService) {
        self.apply_cell(toast, |e| e.set_image_file(slot, file));
    }

    pub fn clear_image(&self, slot: ImageSlot, toast: ToastService) {
        self.apply_cell(toast, |e| e.clear_image(slot));
    }

    /// Загрузить выбранные файлы и сохранить конфигурацию
    pub fn save_command(&self, api: GridConfigurationApi, ctx: AppGlobalContext, toast: ToastService) {
        if self.saving.get_untracked() {
            return;
        }
        let meta = self.meta.get_untracked();
        let editor = self.editor.get_untracked();

        let vm = *self;
        vm.saving.set(true);
        vm.error.set(None);
        spawn_local(async move {
            let result = save_configuration(&meta, &editor, &api, &api).await;
            vm.saving.try_set(false);
            match result {
                Ok(outcome) => {
                    log::info!("grid configuration saved: {}", outcome.id());
                    toast.success(match outcome {
                        SaveOutcome::Created(_) => "Сетка создана",
                        SaveOutcome::Updated(_) => "Сетка сохранена",
                    });
                    ctx.invalidate_grid_lists();
                    vm.touched.try_set(false);
                    ctx.dirty.set(false);
                    ctx.open(Page::GridList);
                }
                Err(e) => {
                    let message = e.to_string();
                    vm.error.try_set(Some(message.clone()));
                    toast.error(message);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_field_apply() {
        let dims = GridDimensions::default();
        let changed = DimensionField::Columns.apply(dims, 3);
        assert_eq!(changed.columns, 3);
        assert_eq!(changed.rows, dims.rows);
        assert_eq!(DimensionField::Columns.get(&changed), 3);

        let changed = DimensionField::MobileRows.apply(dims, 3);
        assert_eq!(changed.mobile_rows, 3);
        assert_eq!(changed.mobile_columns, dims.mobile_columns);
    }

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension("4"), 4);
        assert_eq!(parse_dimension(" 12 "), 12);
        assert_eq!(parse_dimension(""), 0);
        assert_eq!(parse_dimension("-1"), 0);
        assert_eq!(parse_dimension("abc"), 0);
    }

    #[test]
    fn test_unsaved_input_heuristic() {
        let editor: GridEditor<()> = GridEditor::new();
        let mut meta = GridFormMeta::default();
        assert!(!has_unsaved_input(&meta, &editor));

        meta.title = "   ".to_string();
        assert!(!has_unsaved_input(&meta, &editor));

        meta.title = "Главная".to_string();
        assert!(has_unsaved_input(&meta, &editor));

        let mut editor: GridEditor<()> = GridEditor::new();
        let first = editor.items()[0].id;
        editor.set_image_file(ImageSlot::Cell(first), ()).unwrap();
        assert!(has_unsaved_input(&GridFormMeta::default(), &editor));
    }
}
