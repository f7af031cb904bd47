use contracts::domain::a002_content_entity::aggregate::ContentEntity;
use contracts::domain::a002_content_entity::selector::ContentQuery;
use contracts::enums::content_type::ContentType;
use contracts::shared::api_response::Paginated;

use crate::shared::api_client::ApiClient;

/// Каталог товаров, категорий, коллекций и брендов
#[derive(Debug, Clone)]
pub struct ContentApi {
    client: ApiClient,
}

impl ContentApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        content_type: ContentType,
        query: &ContentQuery,
    ) -> Result<Paginated<ContentEntity>, String> {
        self.client.get(&content_list_path(content_type, query)).await
    }

    /// Заполнить каталог демонстрационными данными
    pub async fn insert_test_data(&self) -> Result<(), String> {
        self.client.post_empty("/api/content/testdata").await
    }
}

fn content_list_path(content_type: ContentType, query: &ContentQuery) -> String {
    format!(
        "/api/content/{}?{}",
        urlencoding::encode(content_type.code()),
        serde_qs::to_string(query).unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_list_path() {
        let query = ContentQuery {
            page: 2,
            per_page: 20,
            search: "кеды".to_string(),
        };
        let path = content_list_path(ContentType::SubCategory, &query);
        assert!(path.starts_with("/api/content/subCategory?page=2&per_page=20&search="));
        assert!(!path.contains("кеды"));
    }
}
