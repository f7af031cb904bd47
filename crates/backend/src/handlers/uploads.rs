use axum::extract::Multipart;
use axum::Json;
use contracts::shared::api_response::ApiResponse;
use contracts::shared::upload::{UploadedImage, IMAGE_FIELD};

use crate::shared::api_error::{AppError, AppResult};
use crate::shared::config::get_config;
use crate::shared::uploads::store_image;

/// POST /api/upload/image
///
/// Multipart form with a single `image` field; other fields are ignored.
pub async fn upload_image(mut multipart: Multipart) -> AppResult<Json<ApiResponse<UploadedImage>>> {
    let config = get_config()?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let url = store_image(config, file_name.as_deref(), content_type.as_deref(), &data).await?;
        return Ok(Json(ApiResponse::ok(UploadedImage { url })));
    }

    Err(AppError::BadRequest(format!(
        "Поле '{}' с файлом не найдено",
        IMAGE_FIELD
    )))
}
