use serde::{Deserialize, Serialize};

/// Имя поля multipart-формы с файлом изображения
pub const IMAGE_FIELD: &str = "image";

/// Ответ на загрузку изображения
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub url: String,
}
