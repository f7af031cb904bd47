//! REST-доступ к конфигурациям сетки и загрузка изображений

use async_trait::async_trait;
use contracts::domain::a001_grid_configuration::aggregate::{
    CreatedId, GridConfiguration, GridConfigurationDto, GridConfigurationListQuery,
    PositionUpdate, SetActiveRequest,
};
use contracts::domain::a001_grid_configuration::save::{GridConfigurationStore, ImageUploader};
use contracts::shared::api_response::Paginated;
use contracts::shared::upload::{UploadedImage, IMAGE_FIELD};
use web_sys::{File, FormData};

use crate::shared::api_client::ApiClient;

const BASE: &str = "/api/grid_configuration";

#[derive(Debug, Clone)]
pub struct GridConfigurationApi {
    client: ApiClient,
}

impl GridConfigurationApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        query: &GridConfigurationListQuery,
    ) -> Result<Paginated<GridConfiguration>, String> {
        self.client.get(&list_path(query)).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<GridConfiguration, String> {
        self.client.get(&item_path(id)).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), String> {
        self.client.delete_unit(&item_path(id)).await
    }

    pub async fn set_active(&self, id: &str, is_active: bool) -> Result<(), String> {
        self.client
            .post_unit(
                &format!("{}/active", item_path(id)),
                &SetActiveRequest { is_active },
            )
            .await
    }
}

fn list_path(query: &GridConfigurationListQuery) -> String {
    let qs = serde_qs::to_string(query).unwrap_or_default();
    if qs.is_empty() {
        BASE.to_string()
    } else {
        format!("{}?{}", BASE, qs)
    }
}

fn item_path(id: &str) -> String {
    format!("{}/{}", BASE, urlencoding::encode(id))
}

#[async_trait(?Send)]
impl ImageUploader for GridConfigurationApi {
    type File = File;

    async fn upload(&self, file: File) -> Result<String, String> {
        let form = FormData::new().map_err(|e| format!("{e:?}"))?;
        form.append_with_blob_and_filename(IMAGE_FIELD, &file, &file.name())
            .map_err(|e| format!("{e:?}"))?;
        let uploaded: UploadedImage = self.client.post_form("/api/upload/image", form).await?;
        log::debug!("uploaded {} -> {}", file.name(), uploaded.url);
        Ok(uploaded.url)
    }
}

#[async_trait(?Send)]
impl GridConfigurationStore for GridConfigurationApi {
    async fn create(&self, dto: &GridConfigurationDto) -> Result<String, String> {
        let created: CreatedId = self.client.post(BASE, dto).await?;
        Ok(created.id)
    }

    async fn update(&self, id: &str, dto: &GridConfigurationDto) -> Result<(), String> {
        self.client.put_unit(&item_path(id), dto).await
    }

    async fn update_positions(&self, updates: &[PositionUpdate]) -> Result<(), String> {
        self.client
            .put_unit(&format!("{}/positions", BASE), &updates)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::enums::keyword::Keyword;

    #[test]
    fn test_list_path() {
        assert_eq!(list_path(&GridConfigurationListQuery::default()), BASE);

        let query = GridConfigurationListQuery {
            keyword: Some(Keyword::Cart),
            search: None,
            page: Some(2),
            per_page: Some(20),
        };
        assert_eq!(
            list_path(&query),
            "/api/grid_configuration?keyword=cart&page=2&per_page=20"
        );
    }

    #[test]
    fn test_item_path_is_encoded() {
        assert_eq!(item_path("a b"), "/api/grid_configuration/a%20b");
    }
}
