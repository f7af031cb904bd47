use thiserror::Error;

use super::editor::GridItemId;

/// Ошибки редактора сетки, обнаруживаемые до любого сетевого вызова
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("Размер «{field}» должен быть от 1 до {max}, получено {value}")]
    DimensionOutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },
    #[error(
        "Количество ячеек не совпадает: десктоп {desktop_total}, мобильная версия {mobile_total}"
    )]
    DimensionMismatch {
        desktop_total: u32,
        mobile_total: u32,
    },
    #[error("Количество элементов ({actual}) не совпадает с размером сетки ({expected})")]
    ItemCountMismatch { expected: usize, actual: usize },
    #[error("Заголовок обязателен для заполнения")]
    TitleRequired,
    #[error("Есть неподтверждённое изменение сетки")]
    PendingConfirmation,
    #[error("Ячейка {0:?} не найдена")]
    CellNotFound(GridItemId),
}

/// Ошибки сохранения конфигурации
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("{0}")]
    Validation(#[from] GridError),
    #[error("Не удалось загрузить изображений: {failed} из {total}")]
    Upload { failed: usize, total: usize },
    #[error("Ошибка сохранения: {0}")]
    Persist(String),
}
