//! Адрес backend-сервера

/// Базовый URL API: тот же хост, что у страницы, порт 3000.
/// Пустая строка, если `window` недоступен.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Полный URL для пути вида `/api/...`
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Абсолютный URL картинки: загруженные файлы отдаются backend'ом по относительному пути
pub fn asset_url(url: &str) -> String {
    if url.starts_with('/') && !url.starts_with("//") {
        api_url(url)
    } else {
        url.to_string()
    }
}
