//! Клиент REST API.
//!
//! Сессия передаётся клиенту явно при создании, глобального состояния
//! авторизации здесь нет.

use contracts::shared::api_response::ApiResponse;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::FormData;

use super::api_utils::api_url;

const SESSION_EXPIRED: &str = "Сессия истекла, войдите заново";

/// Данные авторизации, с которыми выполняются запросы
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    access_token: Option<String>,
}

impl Session {
    pub fn new(access_token: Option<String>) -> Self {
        Self { access_token }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    fn authorization(&self) -> Option<String> {
        self.access_token
            .as_deref()
            .map(|token| format!("Bearer {}", token))
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    session: Session,
}

impl ApiClient {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.authorization() {
            Some(value) => builder.header("Authorization", &value),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, String> {
        let response = self
            .authorize(Request::get(&api_url(path)))
            .send()
            .await
            .map_err(network_error)?;
        read_envelope::<T>(response).await?.into_result()
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, String> {
        let request = self
            .authorize(Request::post(&api_url(path)))
            .json(body)
            .map_err(|e| format!("Ошибка сериализации запроса: {}", e))?;
        let response = request.send().await.map_err(network_error)?;
        read_envelope::<T>(response).await?.into_result()
    }

    /// POST без тела, важен только флаг `success`
    pub async fn post_empty(&self, path: &str) -> Result<(), String> {
        let response = self
            .authorize(Request::post(&api_url(path)))
            .send()
            .await
            .map_err(network_error)?;
        read_envelope::<serde_json::Value>(response).await?.into_unit()
    }

    pub async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), String> {
        let request = self
            .authorize(Request::post(&api_url(path)))
            .json(body)
            .map_err(|e| format!("Ошибка сериализации запроса: {}", e))?;
        let response = request.send().await.map_err(network_error)?;
        read_envelope::<serde_json::Value>(response).await?.into_unit()
    }

    pub async fn put_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), String> {
        let request = self
            .authorize(Request::put(&api_url(path)))
            .json(body)
            .map_err(|e| format!("Ошибка сериализации запроса: {}", e))?;
        let response = request.send().await.map_err(network_error)?;
        read_envelope::<serde_json::Value>(response).await?.into_unit()
    }

    pub async fn delete_unit(&self, path: &str) -> Result<(), String> {
        let response = self
            .authorize(Request::delete(&api_url(path)))
            .send()
            .await
            .map_err(network_error)?;
        read_envelope::<serde_json::Value>(response).await?.into_unit()
    }

    /// multipart/form-data; заголовок Content-Type с boundary ставит браузер
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: FormData,
    ) -> Result<T, String> {
        let request = self
            .authorize(Request::post(&api_url(path)))
            .body(form)
            .map_err(|e| format!("Ошибка формирования запроса: {}", e))?;
        let response = request.send().await.map_err(network_error)?;
        read_envelope::<T>(response).await?.into_result()
    }
}

fn network_error(e: gloo_net::Error) -> String {
    format!("Сервер недоступен: {}", e)
}

async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<ApiResponse<T>, String> {
    let status = response.status();
    let parsed = response
        .json::<ApiResponse<T>>()
        .await
        .map_err(|e| e.to_string());
    check_envelope(status, parsed)
}

/// Сервер отдаёт конверт и с кодами ошибок, поэтому сначала смотрим на тело
fn check_envelope<T>(
    status: u16,
    parsed: Result<ApiResponse<T>, String>,
) -> Result<ApiResponse<T>, String> {
    match parsed {
        Ok(envelope) => Ok(envelope),
        Err(_) if status == 401 => Err(SESSION_EXPIRED.to_string()),
        Err(_) if status == 413 => Err("Файл слишком большой".to_string()),
        Err(e) if (200..300).contains(&status) => {
            Err(format!("Некорректный ответ сервера: {}", e))
        }
        Err(_) => Err(format!("HTTP {}", status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_authorization_header() {
        assert_eq!(Session::default().authorization(), None);
        let session = Session::new(Some("abc".to_string()));
        assert_eq!(session.access_token(), Some("abc"));
        assert_eq!(session.authorization().as_deref(), Some("Bearer abc"));
    }

    #[test]
    fn test_envelope_error_message_wins_over_status() {
        let parsed: Result<ApiResponse<()>, String> =
            Ok(ApiResponse::error("Конфигурация не найдена"));
        let envelope = check_envelope(404, parsed).unwrap();
        assert_eq!(envelope.into_unit(), Err("Конфигурация не найдена".to_string()));
    }

    #[test]
    fn test_unparsable_body_maps_status() {
        let broken = || -> Result<ApiResponse<()>, String> { Err("EOF".to_string()) };
        assert_eq!(check_envelope(401, broken()).unwrap_err(), SESSION_EXPIRED);
        assert_eq!(check_envelope(413, broken()).unwrap_err(), "Файл слишком большой");
        assert_eq!(check_envelope(502, broken()).unwrap_err(), "HTTP 502");
        assert!(check_envelope(200, broken())
            .unwrap_err()
            .starts_with("Некорректный ответ"));
    }
}
