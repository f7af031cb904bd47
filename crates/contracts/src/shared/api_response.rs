//! Общий конверт ответов REST API: `{ success, data, message }`

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Развернуть конверт: `success == false` или отсутствие данных превращается в ошибку
    pub fn into_result(self) -> Result<T, String> {
        if !self.success {
            return Err(self
                .message
                .unwrap_or_else(|| "Неизвестная ошибка сервера".to_string()));
        }
        self.data
            .ok_or_else(|| "Пустой ответ сервера".to_string())
    }

    /// Для ответов без данных важен только флаг `success`
    pub fn into_unit(self) -> Result<(), String> {
        if self.success {
            Ok(())
        } else {
            Err(self
                .message
                .unwrap_or_else(|| "Неизвестная ошибка сервера".to_string()))
        }
    }
}

/// Страница данных
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// Номер страницы, начиная с 1
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: u64, per_page: u64, total: u64) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(per_page)
        };
        Self {
            items,
            page,
            per_page,
            total,
            total_pages,
        }
    }

    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_result() {
        assert_eq!(ApiResponse::ok(5).into_result(), Ok(5));
        assert_eq!(
            ApiResponse::<i32>::error("boom").into_result(),
            Err("boom".to_string())
        );
        let empty: ApiResponse<i32> = ApiResponse {
            success: true,
            data: None,
            message: None,
        };
        assert!(empty.into_result().is_err());
    }

    #[test]
    fn test_unit_response_ignores_null_data() {
        let r: ApiResponse<()> = serde_json::from_str(r#"{"success":true,"data":null}"#).unwrap();
        assert_eq!(r.into_unit(), Ok(()));
        let r: ApiResponse<()> = ApiResponse::error("нет доступа");
        assert_eq!(r.into_unit(), Err("нет доступа".to_string()));
    }

    #[test]
    fn test_envelope_missing_fields_deserialize() {
        let r: ApiResponse<Vec<i32>> =
            serde_json::from_str(r#"{"success":false,"message":"nope"}"#).unwrap();
        assert!(!r.success);
        assert_eq!(r.data, None);
    }

    #[test]
    fn test_paginated_pages() {
        let p = Paginated::new(vec![1, 2], 1, 2, 5);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_more());
        let last = Paginated::new(vec![5], 3, 2, 5);
        assert!(!last.has_more());
        let empty: Paginated<i32> = Paginated::new(vec![], 1, 20, 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_more());
    }
}
