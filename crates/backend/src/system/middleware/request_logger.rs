use axum::body::to_bytes;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use crate::shared::format::format_number;

/// Цвет времени в консоли: голубой для 2xx, коричневый для остальных
fn status_color(status: u16) -> &'static str {
    if (200..300).contains(&status) {
        "36"
    } else {
        "33"
    }
}

/// Middleware для логирования HTTP запросов
///
/// Выводит в консоль время (MSK, UTC+3), длительность, размер ответа,
/// статус, метод и путь. Ошибки 5xx дополнительно уходят в tracing.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();
    let status = parts.status.as_u16();

    // Читаем тело ответа, чтобы узнать реальный размер
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            let timestamp = Utc::now() + chrono::Duration::hours(3);
            println!(
                "\x1b[33m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
                timestamp.format("%H:%M:%S"),
                start.elapsed().as_millis(),
                "error",
                status,
                method,
                uri.path()
            );
            tracing::warn!("Failed to read response body for {} {}: {}", method, uri.path(), e);
            return Response::from_parts(parts, Body::default());
        }
    };

    let timestamp = Utc::now() + chrono::Duration::hours(3);
    println!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
        status_color(status),
        timestamp.format("%H:%M:%S"),
        start.elapsed().as_millis(),
        format_number(bytes.len()),
        status,
        method,
        uri.path()
    );

    if status >= 500 {
        tracing::error!("{} {} -> {}", method, uri.path(), status);
    }

    Response::from_parts(parts, Body::from(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_color() {
        assert_eq!(status_color(200), "36");
        assert_eq!(status_color(201), "36");
        assert_eq!(status_color(404), "33");
        assert_eq!(status_color(500), "33");
    }
}
