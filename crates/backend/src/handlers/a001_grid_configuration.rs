use axum::extract::{Path, Query};
use axum::Json;
use contracts::domain::a001_grid_configuration::aggregate::{
    CreatedId, GridConfiguration, GridConfigurationDto, GridConfigurationId,
    GridConfigurationListQuery, PositionUpdate, SetActiveRequest,
};
use contracts::domain::common::{AggregateId, AggregateRoot};
use contracts::shared::api_response::{ApiResponse, Paginated};
use uuid::Uuid;

use crate::domain::a001_grid_configuration;
use crate::shared::api_error::{AppError, AppResult};
use crate::system::auth::extractor::CurrentUser;

fn parse_id(id: &str) -> AppResult<Uuid> {
    GridConfigurationId::from_string(id)
        .map(|id| id.value())
        .map_err(|_| AppError::BadRequest(format!("Некорректный id: {}", id)))
}

fn not_found(id: &str) -> AppError {
    AppError::not_found(GridConfiguration::element_name(), id)
}

/// GET /api/grid_configuration
pub async fn list(
    Query(query): Query<GridConfigurationListQuery>,
) -> AppResult<Json<ApiResponse<Paginated<GridConfiguration>>>> {
    let page = a001_grid_configuration::service::list(query).await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/grid_configuration/:id
pub async fn get_by_id(Path(id): Path<String>) -> AppResult<Json<ApiResponse<GridConfiguration>>> {
    let uuid = parse_id(&id)?;
    let item = a001_grid_configuration::service::get_by_id(uuid)
        .await?
        .ok_or_else(|| not_found(&id))?;
    Ok(Json(ApiResponse::ok(item)))
}

/// POST /api/grid_configuration
pub async fn create(
    user: CurrentUser,
    Json(dto): Json<GridConfigurationDto>,
) -> AppResult<Json<ApiResponse<CreatedId>>> {
    let id = a001_grid_configuration::service::create(dto).await?;
    tracing::info!("Grid configuration {} created by {}", id, user.username());
    Ok(Json(ApiResponse::ok_with_message(
        CreatedId { id: id.to_string() },
        "Конфигурация создана",
    )))
}

/// PUT /api/grid_configuration/:id
pub async fn update(
    user: CurrentUser,
    Path(id): Path<String>,
    Json(dto): Json<GridConfigurationDto>,
) -> AppResult<Json<ApiResponse<()>>> {
    let uuid = parse_id(&id)?;
    a001_grid_configuration::service::update(uuid, dto).await?;
    tracing::info!("Grid configuration {} updated by {}", id, user.username());
    Ok(Json(ApiResponse::ok_with_message((), "Конфигурация сохранена")))
}

/// DELETE /api/grid_configuration/:id
pub async fn delete(
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let uuid = parse_id(&id)?;
    if !a001_grid_configuration::service::delete(uuid).await? {
        return Err(not_found(&id));
    }
    tracing::info!("Grid configuration {} deleted by {}", id, user.username());
    Ok(Json(ApiResponse::ok_with_message((), "Конфигурация удалена")))
}

/// POST /api/grid_configuration/:id/active
pub async fn set_active(
    Path(id): Path<String>,
    Json(request): Json<SetActiveRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let uuid = parse_id(&id)?;
    if !a001_grid_configuration::service::set_active(uuid, request.is_active).await? {
        return Err(not_found(&id));
    }
    Ok(Json(ApiResponse::ok(())))
}

/// PUT /api/grid_configuration/positions
pub async fn update_positions(
    user: CurrentUser,
    Json(updates): Json<Vec<PositionUpdate>>,
) -> AppResult<Json<ApiResponse<()>>> {
    tracing::info!("{} reorders {} grid configurations", user.username(), updates.len());
    a001_grid_configuration::service::update_positions(updates).await?;
    Ok(Json(ApiResponse::ok_with_message((), "Порядок сохранён")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert!(matches!(parse_id("positions"), Err(AppError::BadRequest(_))));
    }
}
