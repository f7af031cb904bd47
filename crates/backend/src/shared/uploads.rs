use sha2::{Digest, Sha256};

use super::api_error::AppError;
use super::config::{get_uploads_dir, Config};
use super::format::format_bytes;

/// Расширения изображений, которые принимает сервер
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg", "avif"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("Пустой файл")]
    Empty,
    #[error("{size} при максимуме {max}")]
    TooLarge { size: String, max: String },
    #[error("Неподдерживаемый тип файла: {0}")]
    UnsupportedType(String),
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::TooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            other => AppError::BadRequest(other.to_string()),
        }
    }
}

fn extension_from_mime(mime: &str) -> Option<&'static str> {
    match mime {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/svg+xml" => Some("svg"),
        "image/avif" => Some("avif"),
        _ => None,
    }
}

/// Определить расширение по имени файла, затем по MIME-типу
pub fn image_extension(
    file_name: Option<&str>,
    content_type: Option<&str>,
) -> Result<&'static str, UploadError> {
    if let Some((_, ext)) = file_name.and_then(|n| n.rsplit_once('.')) {
        let ext = ext.to_lowercase();
        if let Some(found) = ALLOWED_EXTENSIONS.iter().find(|a| **a == ext) {
            return Ok(if *found == "jpeg" { "jpg" } else { *found });
        }
    }
    if let Some(ext) = content_type.and_then(extension_from_mime) {
        return Ok(ext);
    }
    Err(UploadError::UnsupportedType(
        file_name
            .or(content_type)
            .unwrap_or("unknown")
            .to_string(),
    ))
}

/// Проверить размер загружаемого файла
pub fn check_size(size: usize, max_bytes: usize) -> Result<(), UploadError> {
    if size == 0 {
        return Err(UploadError::Empty);
    }
    if size > max_bytes {
        return Err(UploadError::TooLarge {
            size: format_bytes(size),
            max: format_bytes(max_bytes),
        });
    }
    Ok(())
}

/// Имя файла на диске: SHA-256 содержимого, одинаковые файлы хранятся один раз
pub fn stored_file_name(bytes: &[u8], ext: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}.{}", hasher.finalize(), ext)
}

pub fn public_url(public_path: &str, file_name: &str) -> String {
    format!("{}/{}", public_path.trim_end_matches('/'), file_name)
}

/// Сохранить изображение и вернуть его публичный URL
pub async fn store_image(
    config: &Config,
    file_name: Option<&str>,
    content_type: Option<&str>,
    bytes: &[u8],
) -> anyhow::Result<String> {
    check_size(bytes.len(), config.uploads.max_bytes).map_err(AppError::from)?;
    let ext = image_extension(file_name, content_type).map_err(AppError::from)?;

    let dir = get_uploads_dir(config);
    tokio::fs::create_dir_all(&dir).await?;

    let stored = stored_file_name(bytes, ext);
    let path = dir.join(&stored);
    if tokio::fs::try_exists(&path).await.unwrap_or(false) {
        tracing::debug!("Upload {} already stored", stored);
    } else {
        tokio::fs::write(&path, bytes).await?;
        tracing::info!(
            "Stored upload {} ({} bytes) as {}",
            file_name.unwrap_or("<unnamed>"),
            bytes.len(),
            stored
        );
    }

    Ok(public_url(&config.uploads.public_path, &stored))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_from_file_name() {
        assert_eq!(image_extension(Some("Banner.PNG"), None), Ok("png"));
        assert_eq!(image_extension(Some("photo.jpeg"), Some("image/png")), Ok("jpg"));
    }

    #[test]
    fn test_extension_falls_back_to_mime() {
        assert_eq!(image_extension(Some("blob"), Some("image/webp")), Ok("webp"));
        assert_eq!(image_extension(None, Some("image/svg+xml")), Ok("svg"));
    }

    #[test]
    fn test_rejects_non_images() {
        assert_eq!(
            image_extension(Some("notes.txt"), Some("text/plain")),
            Err(UploadError::UnsupportedType("notes.txt".into()))
        );
    }

    #[test]
    fn test_size_limits() {
        assert_eq!(check_size(0, 100), Err(UploadError::Empty));
        assert!(check_size(100, 100).is_ok());
        assert!(matches!(
            check_size(101, 100),
            Err(UploadError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_stored_name_is_content_addressed() {
        let a = stored_file_name(b"same", "png");
        let b = stored_file_name(b"same", "png");
        let c = stored_file_name(b"other", "png");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.ends_with(".png"));
        assert_eq!(a.len(), 64 + 4);
    }

    #[test]
    fn test_public_url() {
        assert_eq!(public_url("/uploads/", "x.png"), "/uploads/x.png");
        assert_eq!(public_url("/uploads", "x.png"), "/uploads/x.png");
    }

    #[test]
    fn test_errors_map_to_statuses() {
        let too_large = UploadError::TooLarge {
            size: "2 МБ".into(),
            max: "1 МБ".into(),
        };
        assert!(matches!(AppError::from(too_large), AppError::PayloadTooLarge(_)));
        assert!(matches!(AppError::from(UploadError::Empty), AppError::BadRequest(_)));
    }
}
