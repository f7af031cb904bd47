use std::collections::HashSet;

use super::repository::{self, GridConfigurationFilter};
use crate::shared::api_error::AppError;
use contracts::domain::a001_grid_configuration::aggregate::{
    GridConfiguration, GridConfigurationDto, GridConfigurationListQuery, PositionUpdate,
};
use contracts::domain::common::AggregateRoot;
use contracts::shared::api_response::Paginated;
use uuid::Uuid;

pub const DEFAULT_PER_PAGE: u64 = 20;
pub const MAX_PER_PAGE: u64 = 100;

/// Номер страницы от 1, размер страницы в пределах 1..=MAX_PER_PAGE
pub fn normalize_paging(page: Option<u64>, per_page: Option<u64>) -> (u64, u64) {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
    (page, per_page)
}

/// Пустая строка поиска означает отсутствие фильтра
pub fn normalize_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn validation_error(aggregate: &GridConfiguration) -> anyhow::Result<()> {
    aggregate
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()).into())
}

/// Проверка пакета позиций до записи в БД
pub fn validate_position_updates(updates: &[PositionUpdate]) -> Result<(), AppError> {
    if updates.is_empty() {
        return Err(AppError::BadRequest("Пустой список позиций".into()));
    }
    let mut seen = HashSet::new();
    for update in updates {
        if Uuid::parse_str(&update.id).is_err() {
            return Err(AppError::BadRequest(format!("Некорректный id: {}", update.id)));
        }
        if !seen.insert(update.id.as_str()) {
            return Err(AppError::BadRequest(format!(
                "Позиция для {} указана дважды",
                update.id
            )));
        }
    }
    Ok(())
}

/// Список конфигураций с фильтром по ключевому слову и поиском по заголовку
pub async fn list(query: GridConfigurationListQuery) -> anyhow::Result<Paginated<GridConfiguration>> {
    let (page, per_page) = normalize_paging(query.page, query.per_page);
    let filter = GridConfigurationFilter {
        keyword: query.keyword,
        search: normalize_search(query.search.as_deref()),
        limit: per_page,
        offset: (page - 1) * per_page,
    };
    let (items, total) = repository::list_paginated(&filter).await?;
    Ok(Paginated::new(items, page, per_page, total))
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<GridConfiguration>> {
    repository::get_by_id(id).await
}

/// Создание новой конфигурации в конце списка
pub async fn create(dto: GridConfigurationDto) -> anyhow::Result<Uuid> {
    let position = repository::max_position().await?.map_or(0, |p| p + 1);
    let mut aggregate = GridConfiguration::new_for_insert(&dto, position);

    validation_error(&aggregate)?;
    aggregate.record_write();

    let id = repository::insert(&aggregate).await?;
    tracing::info!("Created grid configuration {} at position {}", id, position);
    Ok(id)
}

/// Обновление существующей конфигурации
pub async fn update(id: Uuid, dto: GridConfigurationDto) -> anyhow::Result<()> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(GridConfiguration::element_name(), &id.to_string()))?;

    aggregate.update(&dto);
    validation_error(&aggregate)?;
    aggregate.record_write();

    repository::update(&aggregate).await?;
    tracing::debug!(
        "Grid configuration {} saved, version {}",
        aggregate.id().value(),
        aggregate.metadata().version
    );
    Ok(())
}

/// Мягкое удаление
pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn set_active(id: Uuid, is_active: bool) -> anyhow::Result<bool> {
    repository::set_active(id, is_active).await
}

/// Сохранить порядок после перетаскивания
pub async fn update_positions(updates: Vec<PositionUpdate>) -> anyhow::Result<()> {
    validate_position_updates(&updates)?;
    repository::update_positions(&updates).await?;
    tracing::info!("Updated positions of {} grid configurations", updates.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_paging() {
        assert_eq!(normalize_paging(None, None), (1, DEFAULT_PER_PAGE));
        assert_eq!(normalize_paging(Some(0), Some(0)), (1, 1));
        assert_eq!(normalize_paging(Some(3), Some(500)), (3, MAX_PER_PAGE));
    }

    #[test]
    fn test_normalize_search() {
        assert_eq!(normalize_search(None), None);
        assert_eq!(normalize_search(Some("   ")), None);
        assert_eq!(normalize_search(Some(" хиты ")), Some("хиты".to_string()));
    }

    #[test]
    fn test_position_updates_validation() {
        let id = Uuid::new_v4().to_string();
        let ok = vec![PositionUpdate {
            id: id.clone(),
            position: 0,
        }];
        assert!(validate_position_updates(&ok).is_ok());
        assert!(validate_position_updates(&[]).is_err());

        let dup = vec![
            PositionUpdate {
                id: id.clone(),
                position: 0,
            },
            PositionUpdate { id, position: 1 },
        ];
        assert!(matches!(
            validate_position_updates(&dup),
            Err(AppError::BadRequest(_))
        ));

        let bad = vec![PositionUpdate {
            id: "nope".into(),
            position: 0,
        }];
        assert!(validate_position_updates(&bad).is_err());
    }
}
