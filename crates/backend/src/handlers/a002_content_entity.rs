use axum::extract::{Path, Query};
use axum::Json;
use contracts::domain::a002_content_entity::aggregate::ContentEntity;
use contracts::enums::content_type::ContentType;
use contracts::shared::api_response::{ApiResponse, Paginated};
use serde::Deserialize;

use crate::domain::a002_content_entity;
use crate::shared::api_error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ContentListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub search: Option<String>,
}

/// GET /api/content/:content_type
pub async fn list(
    Path(content_type): Path<String>,
    Query(query): Query<ContentListQuery>,
) -> AppResult<Json<ApiResponse<Paginated<ContentEntity>>>> {
    let content_type = ContentType::from_code(&content_type)
        .ok_or_else(|| AppError::BadRequest(format!("Неизвестный тип контента: {}", content_type)))?;
    let page = a002_content_entity::service::list(
        content_type,
        query.page,
        query.per_page,
        query.search.as_deref(),
    )
    .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// POST /api/content/testdata
pub async fn insert_test_data() -> AppResult<Json<ApiResponse<()>>> {
    let inserted = a002_content_entity::service::insert_test_data().await?;
    let message = if inserted == 0 {
        "Демо-каталог уже заполнен".to_string()
    } else {
        format!("Добавлено записей: {}", inserted)
    };
    Ok(Json(ApiResponse::ok_with_message((), message)))
}
