use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::api_response::ApiResponse;

/// Ошибка HTTP-обработчика, отдаётся клиенту в конверте `ApiResponse`
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Требуется авторизация")]
    Unauthorized,

    #[error("Файл слишком большой: {0}")]
    PayloadTooLarge(String),

    #[error(transparent)]
    Internal(anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn not_found(what: &str, id: &str) -> Self {
        AppError::NotFound(format!("{} {} не найден(а)", what, id))
    }
}

/// Сервисы возвращают `anyhow::Result`; ошибки, созданные как `AppError`,
/// сохраняют свой статус, остальные считаются внутренними.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<AppError>() {
            Ok(app) => app,
            Err(other) => AppError::Internal(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, self.to_string()),
            AppError::Internal(err) => {
                tracing::error!("Internal error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Внутренняя ошибка сервера".to_string(),
                )
            }
        };

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anyhow_roundtrip_keeps_variant() {
        let err: anyhow::Error = AppError::BadRequest("Заголовок обязателен".into()).into();
        match AppError::from(err) {
            AppError::BadRequest(msg) => assert_eq!(msg, "Заголовок обязателен"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_plain_anyhow_is_internal() {
        let err = anyhow::anyhow!("disk full");
        assert!(matches!(AppError::from(err), AppError::Internal(_)));
    }

    #[test]
    fn test_status_codes() {
        let resp = AppError::not_found("Конфигурация", "42").into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let resp = AppError::Internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
