use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::GridError;
use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use crate::enums::content_type::ContentType;
use crate::enums::keyword::Keyword;

/// Максимальное число строк или колонок сетки
pub const MAX_GRID_SIDE: u32 = 12;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор конфигурации сетки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridConfigurationId(pub Uuid);

impl GridConfigurationId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for GridConfigurationId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(GridConfigurationId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Value objects
// ============================================================================

/// Размеры сетки для десктопа и мобильной версии
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDimensions {
    pub rows: u32,
    pub columns: u32,
    #[serde(rename = "mobileRows")]
    pub mobile_rows: u32,
    #[serde(rename = "mobileColumns")]
    pub mobile_columns: u32,
}

impl Default for GridDimensions {
    fn default() -> Self {
        Self {
            rows: 2,
            columns: 4,
            mobile_rows: 4,
            mobile_columns: 2,
        }
    }
}

impl GridDimensions {
    pub fn new(rows: u32, columns: u32, mobile_rows: u32, mobile_columns: u32) -> Self {
        Self {
            rows,
            columns,
            mobile_rows,
            mobile_columns,
        }
    }

    pub fn desktop_total(&self) -> u32 {
        self.rows * self.columns
    }

    pub fn mobile_total(&self) -> u32 {
        self.mobile_rows * self.mobile_columns
    }

    /// Количество ячеек (валидно только после `validate`)
    pub fn total(&self) -> usize {
        self.desktop_total() as usize
    }

    /// Каждая сторона в диапазоне 1..=MAX_GRID_SIDE, итоги десктопа и мобильной версии равны
    pub fn validate(&self) -> Result<(), GridError> {
        for (field, value) in [
            ("строки", self.rows),
            ("колонки", self.columns),
            ("строки (моб.)", self.mobile_rows),
            ("колонки (моб.)", self.mobile_columns),
        ] {
            if value == 0 || value > MAX_GRID_SIDE {
                return Err(GridError::DimensionOutOfRange {
                    field,
                    value,
                    max: MAX_GRID_SIDE,
                });
            }
        }
        if self.desktop_total() != self.mobile_total() {
            return Err(GridError::DimensionMismatch {
                desktop_total: self.desktop_total(),
                mobile_total: self.mobile_total(),
            });
        }
        Ok(())
    }
}

/// Сохранённое содержимое одной ячейки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ContentItem {
    /// Пустая строка у незаполненной ячейки
    #[serde(rename = "itemId", default)]
    pub item_id: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub content_type: ContentType,
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Конфигурация сетки контента для витрины
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfiguration {
    pub id: GridConfigurationId,
    pub title: String,
    #[serde(rename = "contentType")]
    pub content_type: ContentType,
    #[serde(rename = "isTitleShow")]
    pub is_title_show: bool,
    pub grid: GridDimensions,
    #[serde(rename = "contentItems")]
    pub content_items: Vec<ContentItem>,
    #[serde(rename = "bannerImage")]
    pub banner_image: Option<String>,
    #[serde(rename = "bannerImageMobile")]
    pub banner_image_mobile: Option<String>,
    #[serde(rename = "backgroundImage")]
    pub background_image: Option<String>,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    pub position: i32,
    pub keyword: Keyword,
    pub metadata: EntityMetadata,
}

impl GridConfiguration {
    /// Создать новую конфигурацию для вставки в БД
    pub fn new_for_insert(dto: &GridConfigurationDto, position: i32) -> Self {
        Self {
            id: GridConfigurationId::new_v4(),
            title: dto.title.trim().to_string(),
            content_type: dto.content_type,
            is_title_show: dto.is_title_show,
            grid: dto.grid,
            content_items: dto.content_items.clone(),
            banner_image: dto.banner_image.clone(),
            banner_image_mobile: dto.banner_image_mobile.clone(),
            background_image: dto.background_image.clone(),
            is_active: dto.is_active,
            position,
            keyword: dto.keyword,
            metadata: EntityMetadata::new(),
        }
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    /// Обновить данные из DTO (позиция меняется только перетаскиванием)
    pub fn update(&mut self, dto: &GridConfigurationDto) {
        self.title = dto.title.trim().to_string();
        self.content_type = dto.content_type;
        self.is_title_show = dto.is_title_show;
        self.grid = dto.grid;
        self.content_items = dto.content_items.clone();
        self.banner_image = dto.banner_image.clone();
        self.banner_image_mobile = dto.banner_image_mobile.clone();
        self.background_image = dto.background_image.clone();
        self.is_active = dto.is_active;
        self.keyword = dto.keyword;
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), GridError> {
        if self.title.trim().is_empty() {
            return Err(GridError::TitleRequired);
        }
        self.grid.validate()?;
        if self.content_items.len() != self.grid.total() {
            return Err(GridError::ItemCountMismatch {
                expected: self.grid.total(),
                actual: self.content_items.len(),
            });
        }
        Ok(())
    }
}

impl AggregateRoot for GridConfiguration {
    type Id = GridConfigurationId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.metadata
    }

    fn element_name() -> &'static str {
        "Конфигурация сетки"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления конфигурации
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GridConfigurationDto {
    pub id: Option<String>,
    pub title: String,
    #[serde(rename = "contentType")]
    pub content_type: ContentType,
    #[serde(rename = "isTitleShow")]
    pub is_title_show: bool,
    pub grid: GridDimensions,
    #[serde(rename = "contentItems")]
    pub content_items: Vec<ContentItem>,
    #[serde(rename = "bannerImage")]
    pub banner_image: Option<String>,
    #[serde(rename = "bannerImageMobile")]
    pub banner_image_mobile: Option<String>,
    #[serde(rename = "backgroundImage")]
    pub background_image: Option<String>,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    pub keyword: Keyword,
}

/// Новая позиция конфигурации после перетаскивания
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionUpdate {
    pub id: String,
    pub position: i32,
}

/// Тело запроса на включение/выключение конфигурации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetActiveRequest {
    #[serde(rename = "isActive")]
    pub is_active: bool,
}

/// Параметры списка конфигураций
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GridConfigurationListQuery {
    pub keyword: Option<Keyword>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// Ответ на создание: идентификатор новой записи
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedId {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(rows: u32, columns: u32, mobile_rows: u32, mobile_columns: u32) -> GridConfigurationDto {
        let grid = GridDimensions::new(rows, columns, mobile_rows, mobile_columns);
        GridConfigurationDto {
            title: "Хиты недели".into(),
            grid,
            content_items: vec![ContentItem::default(); (rows * columns) as usize],
            ..Default::default()
        }
    }

    #[test]
    fn test_equal_totals_required() {
        assert!(GridDimensions::new(2, 4, 4, 2).validate().is_ok());
        assert!(GridDimensions::new(3, 2, 1, 6).validate().is_ok());
        assert_eq!(
            GridDimensions::new(2, 3, 2, 2).validate(),
            Err(GridError::DimensionMismatch {
                desktop_total: 6,
                mobile_total: 4
            })
        );
    }

    #[test]
    fn test_mismatch_message_names_both_totals() {
        let err = GridDimensions::new(2, 4, 3, 3).validate().unwrap_err();
        let text = err.to_string();
        assert!(text.contains('8'));
        assert!(text.contains('9'));
    }

    #[test]
    fn test_dimension_range() {
        assert!(matches!(
            GridDimensions::new(0, 4, 4, 0).validate(),
            Err(GridError::DimensionOutOfRange { value: 0, .. })
        ));
        assert!(matches!(
            GridDimensions::new(13, 1, 13, 1).validate(),
            Err(GridError::DimensionOutOfRange { value: 13, .. })
        ));
    }

    #[test]
    fn test_aggregate_validation() {
        let mut agg = GridConfiguration::new_for_insert(&dto(2, 2, 1, 4), 0);
        assert!(agg.validate().is_ok());

        agg.content_items.pop();
        assert_eq!(
            agg.validate(),
            Err(GridError::ItemCountMismatch {
                expected: 4,
                actual: 3
            })
        );

        let mut untitled = dto(1, 1, 1, 1);
        untitled.title = "   ".into();
        let agg = GridConfiguration::new_for_insert(&untitled, 0);
        assert_eq!(agg.validate(), Err(GridError::TitleRequired));
    }

    #[test]
    fn test_update_keeps_position_and_id() {
        let mut agg = GridConfiguration::new_for_insert(&dto(1, 2, 2, 1), 7);
        let id = agg.id;
        let mut changed = dto(2, 2, 2, 2);
        changed.title = "Новинки".into();
        changed.keyword = Keyword::Cart;
        agg.update(&changed);
        assert_eq!(agg.id, id);
        assert_eq!(agg.position, 7);
        assert_eq!(agg.title, "Новинки");
        assert_eq!(agg.keyword, Keyword::Cart);
        assert_eq!(agg.content_items.len(), 4);
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(dto(1, 1, 1, 1)).unwrap();
        assert!(json.get("contentType").is_some());
        assert!(json.get("isTitleShow").is_some());
        assert!(json["grid"].get("mobileRows").is_some());
        assert!(json["contentItems"][0].get("itemId").is_some());
        assert!(json["contentItems"][0].get("type").is_some());
    }
}
