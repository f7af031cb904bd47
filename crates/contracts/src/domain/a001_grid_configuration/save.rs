use std::collections::HashMap;

use async_trait::async_trait;
use futures::future::join_all;

use super::aggregate::{GridConfigurationDto, PositionUpdate};
use super::editor::{GridEditor, GridFormMeta};
use super::error::SaveError;

/// Загрузка одного изображения, возвращает публичный URL
#[async_trait(?Send)]
pub trait ImageUploader {
    type File;

    async fn upload(&self, file: Self::File) -> Result<String, String>;
}

/// Хранилище конфигураций (в браузере - REST API)
#[async_trait(?Send)]
pub trait GridConfigurationStore {
    /// Создать запись, вернуть её идентификатор
    async fn create(&self, dto: &GridConfigurationDto) -> Result<String, String>;

    async fn update(&self, id: &str, dto: &GridConfigurationDto) -> Result<(), String>;

    async fn update_positions(&self, updates: &[PositionUpdate]) -> Result<(), String>;
}

/// Итог успешного сохранения
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(String),
    Updated(String),
}

impl SaveOutcome {
    pub fn id(&self) -> &str {
        match self {
            SaveOutcome::Created(id) | SaveOutcome::Updated(id) => id,
        }
    }
}

/// Сохранить конфигурацию.
///
/// Все ожидающие файлы загружаются параллельно. Если хотя бы одна загрузка
/// не удалась, запись в хранилище не выполняется.
pub async fn save_configuration<U, S>(
    meta: &GridFormMeta,
    editor: &GridEditor<U::File>,
    uploader: &U,
    store: &S,
) -> Result<SaveOutcome, SaveError>
where
    U: ImageUploader,
    U::File: Clone,
    S: GridConfigurationStore,
{
    meta.validate()?;
    editor.validate()?;

    let jobs = editor.upload_jobs();
    let total = jobs.len();
    let results = join_all(
        jobs.into_iter()
            .map(|(slot, file)| async move { (slot, uploader.upload(file).await) }),
    )
    .await;

    let mut uploaded = HashMap::with_capacity(total);
    let mut failed = 0;
    for (slot, result) in results {
        match result {
            Ok(url) => {
                uploaded.insert(slot, url);
            }
            Err(_) => failed += 1,
        }
    }
    if failed > 0 {
        return Err(SaveError::Upload { failed, total });
    }

    let dto = editor.to_dto(meta, &uploaded);
    match &meta.id {
        Some(id) => store
            .update(id, &dto)
            .await
            .map(|_| SaveOutcome::Updated(id.clone()))
            .map_err(SaveError::Persist),
        None => store
            .create(&dto)
            .await
            .map(SaveOutcome::Created)
            .map_err(SaveError::Persist),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_grid_configuration::editor::ImageSlot;
    use crate::domain::a001_grid_configuration::error::GridError;
    use futures::executor::block_on;
    use std::cell::RefCell;

    struct FakeUploader {
        calls: RefCell<Vec<&'static str>>,
    }

    impl FakeUploader {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl ImageUploader for FakeUploader {
        type File = &'static str;

        async fn upload(&self, file: Self::File) -> Result<String, String> {
            self.calls.borrow_mut().push(file);
            if file.starts_with("bad") {
                Err(format!("{} rejected", file))
            } else {
                Ok(format!("https://cdn/{}", file))
            }
        }
    }

    #[derive(Default)]
    struct FakeStore {
        created: RefCell<Vec<GridConfigurationDto>>,
        updated: RefCell<Vec<(String, GridConfigurationDto)>>,
        fail: bool,
    }

    #[async_trait(?Send)]
    impl GridConfigurationStore for FakeStore {
        async fn create(&self, dto: &GridConfigurationDto) -> Result<String, String> {
            if self.fail {
                return Err("db down".into());
            }
            self.created.borrow_mut().push(dto.clone());
            Ok("new-id".into())
        }

        async fn update(&self, id: &str, dto: &GridConfigurationDto) -> Result<(), String> {
            self.updated.borrow_mut().push((id.to_string(), dto.clone()));
            Ok(())
        }

        async fn update_positions(&self, _updates: &[PositionUpdate]) -> Result<(), String> {
            Ok(())
        }
    }

    fn meta(id: Option<&str>) -> GridFormMeta {
        GridFormMeta {
            id: id.map(str::to_string),
            title: "Главная".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_save_without_uploads_persists_once() {
        let editor = GridEditor::<&'static str>::new();
        let uploader = FakeUploader::new();
        let store = FakeStore::default();

        let outcome = block_on(save_configuration(&meta(None), &editor, &uploader, &store));
        assert_eq!(outcome, Ok(SaveOutcome::Created("new-id".into())));
        assert!(uploader.calls.borrow().is_empty());
        assert_eq!(store.created.borrow().len(), 1);
    }

    #[test]
    fn test_failed_upload_blocks_persist() {
        let mut editor = GridEditor::<&'static str>::new();
        let cells: Vec<_> = editor.items().iter().map(|i| i.id).collect();
        editor.set_image_file(ImageSlot::Cell(cells[0]), "ok.png").unwrap();
        editor.set_image_file(ImageSlot::Cell(cells[1]), "bad.png").unwrap();
        editor.set_image_file(ImageSlot::Banner, "banner.png").unwrap();
        let uploader = FakeUploader::new();
        let store = FakeStore::default();

        let outcome = block_on(save_configuration(&meta(Some("g1")), &editor, &uploader, &store));
        assert_eq!(outcome, Err(SaveError::Upload { failed: 1, total: 3 }));
        assert_eq!(uploader.calls.borrow().len(), 3);
        assert!(store.created.borrow().is_empty());
        assert!(store.updated.borrow().is_empty());
    }

    #[test]
    fn test_update_uses_uploaded_urls() {
        let mut editor = GridEditor::<&'static str>::new();
        let cells: Vec<_> = editor.items().iter().map(|i| i.id).collect();
        editor.set_image_file(ImageSlot::Cell(cells[2]), "c.png").unwrap();
        editor.set_image_file(ImageSlot::BannerMobile, "m.png").unwrap();
        let uploader = FakeUploader::new();
        let store = FakeStore::default();

        let outcome = block_on(save_configuration(&meta(Some("g1")), &editor, &uploader, &store));
        assert_eq!(outcome, Ok(SaveOutcome::Updated("g1".into())));

        let updated = store.updated.borrow();
        let (id, dto) = &updated[0];
        assert_eq!(id, "g1");
        assert_eq!(dto.content_items[2].image.as_deref(), Some("https://cdn/c.png"));
        assert_eq!(dto.banner_image_mobile.as_deref(), Some("https://cdn/m.png"));
    }

    #[test]
    fn test_validation_runs_before_uploads() {
        let mut editor = GridEditor::<&'static str>::new();
        editor.set_image_file(ImageSlot::Banner, "banner.png").unwrap();
        let uploader = FakeUploader::new();
        let store = FakeStore::default();
        let mut untitled = meta(None);
        untitled.title.clear();

        let outcome = block_on(save_configuration(&untitled, &editor, &uploader, &store));
        assert_eq!(outcome, Err(SaveError::Validation(GridError::TitleRequired)));
        assert!(uploader.calls.borrow().is_empty());
    }

    #[test]
    fn test_persist_error_is_reported() {
        let editor = GridEditor::<&'static str>::new();
        let uploader = FakeUploader::new();
        let store = FakeStore {
            fail: true,
            ..Default::default()
        };
        let outcome = block_on(save_configuration(&meta(None), &editor, &uploader, &store));
        assert_eq!(outcome, Err(SaveError::Persist("db down".into())));
    }
}
