use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::aggregate::{ContentItem, GridConfiguration, GridConfigurationDto, GridDimensions};
use super::error::GridError;
use crate::domain::a002_content_entity::aggregate::ContentSelection;
use crate::enums::content_type::ContentType;
use crate::enums::keyword::Keyword;

/// Стабильный идентификатор ячейки в рамках одного редактора.
/// Не совпадает с позицией и никогда не переиспользуется.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridItemId(pub u64);

/// Ячейка сетки в редакторе (только уже размещённые на сервере изображения)
#[derive(Debug, Clone, PartialEq)]
pub struct GridItem {
    pub id: GridItemId,
    pub position: usize,
    pub item_id: String,
    pub link: String,
    pub image: Option<String>,
    pub name: String,
    pub content_type: ContentType,
}

impl GridItem {
    pub fn empty(id: GridItemId, position: usize, content_type: ContentType) -> Self {
        Self {
            id,
            position,
            item_id: String::new(),
            link: String::new(),
            image: None,
            name: String::new(),
            content_type,
        }
    }

    fn from_content(id: GridItemId, position: usize, item: &ContentItem) -> Self {
        Self {
            id,
            position,
            item_id: item.item_id.clone(),
            link: item.link.clone(),
            image: item.image.clone(),
            name: item.name.clone(),
            content_type: item.content_type,
        }
    }

    fn to_content_item(&self, image: Option<String>) -> ContentItem {
        ContentItem {
            item_id: self.item_id.clone(),
            link: self.link.clone(),
            image,
            name: self.name.clone(),
            content_type: self.content_type,
        }
    }

    pub fn is_assigned(&self) -> bool {
        !self.item_id.is_empty() || !self.link.is_empty()
    }
}

/// Место, к которому может быть привязан ещё не загруженный файл
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImageSlot {
    Banner,
    BannerMobile,
    Background,
    Cell(GridItemId),
}

/// Локальные файлы, ожидающие загрузки, по слотам
#[derive(Debug, Clone)]
pub struct PendingImages<F> {
    files: BTreeMap<ImageSlot, F>,
}

impl<F> Default for PendingImages<F> {
    fn default() -> Self {
        Self {
            files: BTreeMap::new(),
        }
    }
}

impl<F> PendingImages<F> {
    pub fn insert(&mut self, slot: ImageSlot, file: F) {
        self.files.insert(slot, file);
    }

    pub fn remove(&mut self, slot: ImageSlot) -> Option<F> {
        self.files.remove(&slot)
    }

    pub fn get(&self, slot: ImageSlot) -> Option<&F> {
        self.files.get(&slot)
    }

    pub fn contains(&self, slot: ImageSlot) -> bool {
        self.files.contains_key(&slot)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ImageSlot, &F)> {
        self.files.iter()
    }

    /// Удалить файлы ячеек, которых больше нет в сетке
    pub fn retain_cells(&mut self, alive: &BTreeSet<GridItemId>) {
        self.files.retain(|slot, _| match slot {
            ImageSlot::Cell(id) => alive.contains(id),
            _ => true,
        });
    }
}

/// Характер изменения количества ячеек
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionChange {
    Shrink { removed: usize },
    Grow { added: usize },
    Same,
}

impl DimensionChange {
    pub fn between(current: usize, next: usize) -> Self {
        if next < current {
            DimensionChange::Shrink {
                removed: current - next,
            }
        } else if next > current {
            DimensionChange::Grow {
                added: next - current,
            }
        } else {
            DimensionChange::Same
        }
    }
}

/// Изменение, ожидающее подтверждения пользователя
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingTransition {
    Resize {
        dims: GridDimensions,
        change: DimensionChange,
    },
    ChangeContentType(ContentType),
}

impl PendingTransition {
    /// Текст вопроса для диалога подтверждения
    pub fn prompt(&self) -> String {
        match self {
            PendingTransition::Resize {
                change: DimensionChange::Shrink { removed },
                ..
            } => format!(
                "Сетка уменьшится, последние ячейки ({}) будут удалены вместе с содержимым. Продолжить?",
                removed
            ),
            PendingTransition::Resize {
                change: DimensionChange::Grow { added },
                ..
            } => format!(
                "Сетка увеличится на {} пустых ячеек, заполненные ячейки сохранятся. Продолжить?",
                added
            ),
            PendingTransition::Resize { .. } => "Изменить раскладку сетки?".to_string(),
            PendingTransition::ChangeContentType(ct) => format!(
                "Смена типа контента на «{}» очистит все ячейки. Продолжить?",
                ct.display_name()
            ),
        }
    }
}

/// Результат запроса на изменение
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Unchanged,
    NeedsConfirmation(PendingTransition),
}

/// Поля формы, не относящиеся к сетке
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridFormMeta {
    pub id: Option<String>,
    pub title: String,
    pub is_title_show: bool,
    pub is_active: bool,
    pub keyword: Keyword,
}

impl GridFormMeta {
    pub fn from_configuration(config: &GridConfiguration) -> Self {
        Self {
            id: Some(config.to_string_id()),
            title: config.title.clone(),
            is_title_show: config.is_title_show,
            is_active: config.is_active,
            keyword: config.keyword,
        }
    }

    pub fn validate(&self) -> Result<(), GridError> {
        if self.title.trim().is_empty() {
            return Err(GridError::TitleRequired);
        }
        Ok(())
    }
}

/// Привести список ячеек к новому размеру: хвост отбрасывается,
/// новые пустые ячейки добавляются в конец, позиции пересчитываются.
pub fn reconcile_items(
    items: Vec<GridItem>,
    new_total: usize,
    content_type: ContentType,
    mut alloc: impl FnMut() -> GridItemId,
) -> Vec<GridItem> {
    let mut items = items;
    items.truncate(new_total);
    while items.len() < new_total {
        let position = items.len();
        items.push(GridItem::empty(alloc(), position, content_type));
    }
    for (position, item) in items.iter_mut().enumerate() {
        item.position = position;
    }
    items
}

/// Состояние конструктора сетки.
///
/// `F` - локальный файл (в браузере `web_sys::File`). Применённые размеры и
/// размеры в полях формы хранятся раздельно: сетка перестраивается только
/// через `request_generate` и, при необходимости, `confirm`.
#[derive(Debug, Clone)]
pub struct GridEditor<F> {
    content_type: ContentType,
    dims: GridDimensions,
    draft_dims: GridDimensions,
    items: Vec<GridItem>,
    banner_image: Option<String>,
    banner_image_mobile: Option<String>,
    background_image: Option<String>,
    files: PendingImages<F>,
    pending: Option<PendingTransition>,
    next_id: u64,
}

impl<F> Default for GridEditor<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> GridEditor<F> {
    pub fn new() -> Self {
        let dims = GridDimensions::default();
        let mut editor = Self {
            content_type: ContentType::default(),
            dims,
            draft_dims: dims,
            items: Vec::new(),
            banner_image: None,
            banner_image_mobile: None,
            background_image: None,
            files: PendingImages::default(),
            pending: None,
            next_id: 0,
        };
        editor.rebuild(dims.total());
        editor
    }

    /// Загрузить сохранённую конфигурацию, при этом все локальные файлы сбрасываются
    pub fn from_configuration(config: &GridConfiguration) -> Self {
        let mut editor = Self::new();
        editor.content_type = config.content_type;
        editor.dims = config.grid;
        editor.draft_dims = config.grid;
        editor.banner_image = config.banner_image.clone();
        editor.banner_image_mobile = config.banner_image_mobile.clone();
        editor.background_image = config.background_image.clone();
        let mut items = Vec::with_capacity(config.content_items.len());
        for (position, item) in config.content_items.iter().enumerate() {
            let id = editor.alloc_id();
            items.push(GridItem::from_content(id, position, item));
        }
        editor.items = items;
        if config.grid.validate().is_ok() {
            editor.rebuild(config.grid.total());
        }
        editor
    }

    fn alloc_id(&mut self) -> GridItemId {
        let id = GridItemId(self.next_id);
        self.next_id += 1;
        id
    }

    fn rebuild(&mut self, total: usize) {
        let items = std::mem::take(&mut self.items);
        let content_type = self.content_type;
        let mut next_id = self.next_id;
        self.items = reconcile_items(items, total, content_type, || {
            let id = GridItemId(next_id);
            next_id += 1;
            id
        });
        self.next_id = next_id;
        let alive: BTreeSet<GridItemId> = self.items.iter().map(|i| i.id).collect();
        self.files.retain_cells(&alive);
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Применённые размеры
    pub fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    /// Размеры, введённые в форму, но ещё не применённые
    pub fn draft_dimensions(&self) -> GridDimensions {
        self.draft_dims
    }

    pub fn set_draft_dimensions(&mut self, dims: GridDimensions) {
        self.draft_dims = dims;
    }

    pub fn items(&self) -> &[GridItem] {
        &self.items
    }

    pub fn item(&self, id: GridItemId) -> Option<&GridItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn files(&self) -> &PendingImages<F> {
        &self.files
    }

    pub fn pending(&self) -> Option<PendingTransition> {
        self.pending
    }

    /// Ячейка заполнена, если у неё есть размещённое изображение или выбран файл
    pub fn is_populated(&self, item: &GridItem) -> bool {
        item.image.is_some() || self.files.contains(ImageSlot::Cell(item.id))
    }

    pub fn has_populated_cells(&self) -> bool {
        self.items.iter().any(|i| self.is_populated(i))
    }

    /// Есть ли в форме что-то, что можно потерять
    pub fn has_content(&self) -> bool {
        self.has_populated_cells()
            || self.items.iter().any(GridItem::is_assigned)
            || self.banner_image.is_some()
            || self.banner_image_mobile.is_some()
            || self.background_image.is_some()
            || !self.files.is_empty()
    }

    /// Применить размеры из формы. Подтверждение требуется, если меняется
    /// количество ячеек и хотя бы одна ячейка заполнена.
    pub fn request_generate(&mut self) -> Result<Transition, GridError> {
        let dims = self.draft_dims;
        dims.validate()?;
        let change = DimensionChange::between(self.items.len(), dims.total());
        if dims == self.dims && change == DimensionChange::Same {
            return Ok(Transition::Unchanged);
        }
        if change != DimensionChange::Same && self.has_populated_cells() {
            let transition = PendingTransition::Resize { dims, change };
            self.pending = Some(transition);
            return Ok(Transition::NeedsConfirmation(transition));
        }
        self.apply_resize(dims);
        Ok(Transition::Applied)
    }

    /// Сменить тип контента. Если в ячейках есть изображения, нужно подтверждение,
    /// после которого все ячейки очищаются. Без изображений ячейки не трогаются.
    pub fn request_content_type(&mut self, content_type: ContentType) -> Transition {
        if content_type == self.content_type {
            return Transition::Unchanged;
        }
        if self.has_populated_cells() {
            let transition = PendingTransition::ChangeContentType(content_type);
            self.pending = Some(transition);
            return Transition::NeedsConfirmation(transition);
        }
        self.content_type = content_type;
        Transition::Applied
    }

    /// Подтвердить ожидающее изменение. Возвращает `false`, если подтверждать нечего.
    pub fn confirm(&mut self) -> bool {
        match self.pending.take() {
            Some(PendingTransition::Resize { dims, .. }) => {
                self.apply_resize(dims);
                true
            }
            Some(PendingTransition::ChangeContentType(content_type)) => {
                self.apply_content_type(content_type);
                true
            }
            None => false,
        }
    }

    /// Отменить ожидающее изменение; поля формы возвращаются к применённым значениям
    pub fn cancel(&mut self) {
        if let Some(PendingTransition::Resize { .. }) = self.pending.take() {
            self.draft_dims = self.dims;
        }
    }

    fn apply_resize(&mut self, dims: GridDimensions) {
        self.dims = dims;
        self.draft_dims = dims;
        self.rebuild(dims.total());
    }

    fn apply_content_type(&mut self, content_type: ContentType) {
        self.content_type = content_type;
        let total = self.items.len();
        self.items.clear();
        self.files.retain_cells(&BTreeSet::new());
        self.rebuild(total);
    }

    fn cell_mut(&mut self, id: GridItemId) -> Result<&mut GridItem, GridError> {
        self.items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(GridError::CellNotFound(id))
    }

    /// Привязать выбранный в селекторе элемент к ячейке
    pub fn assign_content(
        &mut self,
        id: GridItemId,
        selection: &ContentSelection,
    ) -> Result<(), GridError> {
        let cell = self.cell_mut(id)?;
        cell.item_id = selection.item_id.clone();
        cell.link = selection.link.clone();
        cell.name = selection.name.clone();
        cell.content_type = selection.content_type;
        if selection.image.is_some() {
            cell.image = selection.image.clone();
        }
        Ok(())
    }

    /// Ручное редактирование ссылки ячейки
    pub fn set_cell_link(&mut self, id: GridItemId, link: &str) -> Result<(), GridError> {
        self.cell_mut(id)?.link = link.trim().to_string();
        Ok(())
    }

    /// Полностью очистить ячейку (содержимое и выбранный файл)
    pub fn clear_cell(&mut self, id: GridItemId) -> Result<(), GridError> {
        let content_type = self.content_type;
        let cell = self.cell_mut(id)?;
        *cell = GridItem::empty(cell.id, cell.position, content_type);
        self.files.remove(ImageSlot::Cell(id));
        Ok(())
    }

    /// Выбрать локальный файл для слота
    pub fn set_image_file(&mut self, slot: ImageSlot, file: F) -> Result<(), GridError> {
        if let ImageSlot::Cell(id) = slot {
            self.cell_mut(id)?;
        }
        self.files.insert(slot, file);
        Ok(())
    }

    /// Убрать изображение слота: и выбранный файл, и размещённый URL
    pub fn clear_image(&mut self, slot: ImageSlot) -> Result<(), GridError> {
        match slot {
            ImageSlot::Banner => self.banner_image = None,
            ImageSlot::BannerMobile => self.banner_image_mobile = None,
            ImageSlot::Background => self.background_image = None,
            ImageSlot::Cell(id) => self.cell_mut(id)?.image = None,
        }
        self.files.remove(slot);
        Ok(())
    }

    /// Размещённый URL слота (без учёта ожидающих файлов)
    pub fn hosted_image(&self, slot: ImageSlot) -> Option<&str> {
        match slot {
            ImageSlot::Banner => self.banner_image.as_deref(),
            ImageSlot::BannerMobile => self.banner_image_mobile.as_deref(),
            ImageSlot::Background => self.background_image.as_deref(),
            ImageSlot::Cell(id) => self.item(id).and_then(|i| i.image.as_deref()),
        }
    }

    /// Состояние готово к сохранению
    pub fn validate(&self) -> Result<(), GridError> {
        if self.pending.is_some() {
            return Err(GridError::PendingConfirmation);
        }
        self.dims.validate()?;
        if self.items.len() != self.dims.total() {
            return Err(GridError::ItemCountMismatch {
                expected: self.dims.total(),
                actual: self.items.len(),
            });
        }
        Ok(())
    }

    /// Собрать DTO, подставив URL только что загруженных файлов вместо размещённых
    pub fn to_dto(
        &self,
        meta: &GridFormMeta,
        uploaded: &HashMap<ImageSlot, String>,
    ) -> GridConfigurationDto {
        let pick = |slot: ImageSlot, hosted: &Option<String>| -> Option<String> {
            uploaded.get(&slot).cloned().or_else(|| hosted.clone())
        };
        GridConfigurationDto {
            id: meta.id.clone(),
            title: meta.title.trim().to_string(),
            content_type: self.content_type,
            is_title_show: meta.is_title_show,
            grid: self.dims,
            content_items: self
                .items
                .iter()
                .map(|item| item.to_content_item(pick(ImageSlot::Cell(item.id), &item.image)))
                .collect(),
            banner_image: pick(ImageSlot::Banner, &self.banner_image),
            banner_image_mobile: pick(ImageSlot::BannerMobile, &self.banner_image_mobile),
            background_image: pick(ImageSlot::Background, &self.background_image),
            is_active: meta.is_active,
            keyword: meta.keyword,
        }
    }
}

impl<F: Clone> GridEditor<F> {
    /// Все файлы, которые нужно загрузить перед сохранением
    pub fn upload_jobs(&self) -> Vec<(ImageSlot, F)> {
        self.files
            .iter()
            .map(|(slot, file)| (*slot, file.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Editor = GridEditor<&'static str>;

    fn selection(id: &str) -> ContentSelection {
        ContentSelection {
            item_id: id.to_string(),
            link: format!("/product/{}", id),
            image: Some(format!("https://cdn/{}.jpg", id)),
            name: id.to_uppercase(),
            content_type: ContentType::Product,
        }
    }

    fn ids(editor: &Editor) -> Vec<GridItemId> {
        editor.items().iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_new_editor_has_default_grid() {
        let editor = Editor::new();
        assert_eq!(editor.items().len(), 8);
        assert!(!editor.has_content());
        assert!(editor.validate().is_ok());
    }

    #[test]
    fn test_reconcile_truncates_and_appends() {
        let mut next = 0u64;
        let mut alloc = || {
            next += 1;
            GridItemId(100 + next)
        };
        let items: Vec<GridItem> = (0..4)
            .map(|p| GridItem::empty(GridItemId(p as u64), p, ContentType::Brand))
            .collect();

        let shrunk = reconcile_items(items.clone(), 2, ContentType::Brand, &mut alloc);
        assert_eq!(
            shrunk.iter().map(|i| i.id).collect::<Vec<_>>(),
            vec![GridItemId(0), GridItemId(1)]
        );

        let grown = reconcile_items(items, 6, ContentType::Brand, &mut alloc);
        assert_eq!(grown.len(), 6);
        assert_eq!(grown[3].id, GridItemId(3));
        assert_eq!(grown[4].id, GridItemId(101));
        assert_eq!(grown[5].id, GridItemId(102));
        assert_eq!(grown[5].position, 5);
    }

    #[test]
    fn test_generate_without_content_applies_immediately() {
        let mut editor = Editor::new();
        editor.set_draft_dimensions(GridDimensions::new(3, 3, 3, 3));
        assert_eq!(editor.request_generate(), Ok(Transition::Applied));
        assert_eq!(editor.items().len(), 9);
        assert_eq!(editor.dimensions(), GridDimensions::new(3, 3, 3, 3));
    }

    #[test]
    fn test_generate_rejects_mismatched_totals() {
        let mut editor = Editor::new();
        editor.set_draft_dimensions(GridDimensions::new(2, 3, 2, 2));
        assert_eq!(
            editor.request_generate(),
            Err(GridError::DimensionMismatch {
                desktop_total: 6,
                mobile_total: 4
            })
        );
        assert_eq!(editor.items().len(), 8);
    }

    #[test]
    fn test_shrink_with_images_needs_confirmation_and_keeps_prefix() {
        let mut editor = Editor::new();
        let first = ids(&editor);
        editor.assign_content(first[0], &selection("a")).unwrap();
        editor.set_image_file(ImageSlot::Cell(first[7]), "tail.png").unwrap();

        editor.set_draft_dimensions(GridDimensions::new(1, 4, 2, 2));
        let result = editor.request_generate().unwrap();
        assert!(matches!(
            result,
            Transition::NeedsConfirmation(PendingTransition::Resize {
                change: DimensionChange::Shrink { removed: 4 },
                ..
            })
        ));
        assert_eq!(editor.items().len(), 8);
        assert_eq!(editor.validate(), Err(GridError::PendingConfirmation));

        assert!(editor.confirm());
        assert_eq!(ids(&editor), first[..4].to_vec());
        assert_eq!(editor.items()[0].item_id, "a");
        assert!(editor.files().is_empty());
    }

    #[test]
    fn test_two_by_four_to_two_by_three_and_back() {
        let mut editor = Editor::new();
        let first = ids(&editor);
        for id in &first {
            editor.set_image_file(ImageSlot::Cell(*id), "cell.png").unwrap();
        }

        editor.set_draft_dimensions(GridDimensions::new(2, 3, 3, 2));
        editor.request_generate().unwrap();
        editor.confirm();
        assert_eq!(ids(&editor), first[..6].to_vec());
        assert_eq!(
            editor.items().iter().map(|i| i.position).collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4, 5]
        );
        assert_eq!(editor.files().len(), 6);

        editor.set_draft_dimensions(GridDimensions::new(2, 4, 4, 2));
        editor.request_generate().unwrap();
        editor.confirm();
        assert_eq!(&ids(&editor)[..6], &first[..6]);
        assert!(!first.contains(&editor.items()[6].id));
        assert!(!editor.is_populated(&editor.items()[7]));
    }

    #[test]
    fn test_grow_preserves_existing_cells() {
        let mut editor = Editor::new();
        let first = ids(&editor);
        editor.assign_content(first[2], &selection("c")).unwrap();

        editor.set_draft_dimensions(GridDimensions::new(3, 4, 6, 2));
        let result = editor.request_generate().unwrap();
        assert!(matches!(
            result,
            Transition::NeedsConfirmation(PendingTransition::Resize {
                change: DimensionChange::Grow { added: 4 },
                ..
            })
        ));
        editor.confirm();
        assert_eq!(editor.items().len(), 12);
        assert_eq!(&ids(&editor)[..8], &first[..]);
        assert_eq!(editor.items()[2].item_id, "c");
        assert!(!editor.items()[10].is_assigned());
    }

    #[test]
    fn test_cancel_restores_draft_dimensions() {
        let mut editor = Editor::new();
        let first = ids(&editor);
        editor.set_image_file(ImageSlot::Cell(first[0]), "x.png").unwrap();
        editor.set_draft_dimensions(GridDimensions::new(1, 1, 1, 1));
        editor.request_generate().unwrap();
        editor.cancel();
        assert_eq!(editor.pending(), None);
        assert_eq!(editor.draft_dimensions(), GridDimensions::default());
        assert_eq!(editor.items().len(), 8);
        assert_eq!(editor.files().len(), 1);
    }

    #[test]
    fn test_same_total_reflow_needs_no_confirmation() {
        let mut editor = Editor::new();
        let first = ids(&editor);
        editor.assign_content(first[0], &selection("a")).unwrap();
        editor.set_draft_dimensions(GridDimensions::new(4, 2, 2, 4));
        assert_eq!(editor.request_generate(), Ok(Transition::Applied));
        assert_eq!(ids(&editor), first);
    }

    #[test]
    fn test_content_type_change_clears_cells_after_confirmation() {
        let mut editor = Editor::new();
        let first = ids(&editor);
        editor.assign_content(first[1], &selection("b")).unwrap();
        editor.set_image_file(ImageSlot::Cell(first[3]), "b.png").unwrap();
        editor.set_image_file(ImageSlot::Banner, "banner.png").unwrap();

        let result = editor.request_content_type(ContentType::Brand);
        assert_eq!(
            result,
            Transition::NeedsConfirmation(PendingTransition::ChangeContentType(ContentType::Brand))
        );
        assert_eq!(editor.content_type(), ContentType::Product);

        editor.confirm();
        assert_eq!(editor.content_type(), ContentType::Brand);
        assert_eq!(editor.items().len(), 8);
        assert!(editor.items().iter().all(|i| !i.is_assigned() && i.image.is_none()));
        assert!(editor.items().iter().all(|i| i.content_type == ContentType::Brand));
        assert!(ids(&editor).iter().all(|id| !first.contains(id)));
        assert_eq!(editor.files().len(), 1);
        assert!(editor.files().contains(ImageSlot::Banner));
    }

    #[test]
    fn test_content_type_change_without_images_keeps_cells() {
        let mut editor = Editor::new();
        let first = ids(&editor);
        editor.set_cell_link(first[0], "/sale").unwrap();
        assert_eq!(
            editor.request_content_type(ContentType::Collection),
            Transition::Applied
        );
        assert_eq!(
            editor.request_content_type(ContentType::Collection),
            Transition::Unchanged
        );
        assert!(!editor.confirm());
        assert_eq!(ids(&editor), first);
        assert_eq!(editor.items()[0].link, "/sale");
    }

    #[test]
    fn test_to_dto_substitutes_uploaded_urls() {
        let mut editor = Editor::new();
        let first = ids(&editor);
        editor.assign_content(first[0], &selection("a")).unwrap();
        editor.set_image_file(ImageSlot::Cell(first[1]), "b.png").unwrap();
        editor.set_image_file(ImageSlot::Background, "bg.png").unwrap();

        let mut uploaded = HashMap::new();
        uploaded.insert(ImageSlot::Cell(first[1]), "https://cdn/up-b.png".to_string());
        uploaded.insert(ImageSlot::Background, "https://cdn/up-bg.png".to_string());

        let meta = GridFormMeta {
            title: " Главная ".into(),
            ..Default::default()
        };
        let dto = editor.to_dto(&meta, &uploaded);
        assert_eq!(dto.title, "Главная");
        assert_eq!(dto.content_items.len(), 8);
        assert_eq!(dto.content_items[0].image.as_deref(), Some("https://cdn/a.jpg"));
        assert_eq!(dto.content_items[1].image.as_deref(), Some("https://cdn/up-b.png"));
        assert_eq!(dto.content_items[2].image, None);
        assert_eq!(dto.background_image.as_deref(), Some("https://cdn/up-bg.png"));
        assert_eq!(dto.banner_image, None);
    }

    #[test]
    fn test_clear_cell_and_unknown_cell() {
        let mut editor = Editor::new();
        let first = ids(&editor);
        editor.assign_content(first[0], &selection("a")).unwrap();
        editor.set_image_file(ImageSlot::Cell(first[0]), "a.png").unwrap();
        editor.clear_cell(first[0]).unwrap();
        assert!(!editor.has_content());

        let missing = GridItemId(9999);
        assert_eq!(
            editor.set_image_file(ImageSlot::Cell(missing), "z.png"),
            Err(GridError::CellNotFound(missing))
        );
    }

    #[test]
    fn test_roundtrip_through_configuration() {
        let mut editor = Editor::new();
        let first = ids(&editor);
        editor.assign_content(first[5], &selection("f")).unwrap();
        let meta = GridFormMeta {
            title: "Каталог".into(),
            ..Default::default()
        };
        let dto = editor.to_dto(&meta, &HashMap::new());
        let config = GridConfiguration::new_for_insert(&dto, 0);

        let loaded = Editor::from_configuration(&config);
        assert_eq!(loaded.items().len(), 8);
        assert_eq!(loaded.items()[5].item_id, "f");
        assert_eq!(loaded.items()[5].link, "/product/f");
        assert!(loaded.has_content());
    }
}
