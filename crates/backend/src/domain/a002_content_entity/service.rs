use std::collections::HashSet;

use super::repository;
use crate::domain::a001_grid_configuration::service::{normalize_paging, normalize_search};
use contracts::domain::a002_content_entity::aggregate::ContentEntity;
use contracts::enums::content_type::ContentType;
use contracts::shared::api_response::Paginated;
use uuid::Uuid;

/// Страница каталога для пикера контента
pub async fn list(
    content_type: ContentType,
    page: Option<u64>,
    per_page: Option<u64>,
    search: Option<&str>,
) -> anyhow::Result<Paginated<ContentEntity>> {
    let (page, per_page) = normalize_paging(page, per_page);
    let search = normalize_search(search);
    let (items, total) = repository::list_paginated(
        content_type,
        search.as_deref(),
        per_page,
        (page - 1) * per_page,
    )
    .await?;
    Ok(Paginated::new(items, page, per_page, total))
}

pub async fn count() -> anyhow::Result<u64> {
    repository::count().await
}

fn entity(
    content_type: ContentType,
    name: &str,
    slug: &str,
    parent_slug: Option<&str>,
) -> ContentEntity {
    ContentEntity {
        id: Uuid::new_v4().to_string(),
        content_type,
        name: name.to_string(),
        slug: slug.to_string(),
        // Без картинки пикер показывает иконку
        image: None,
        parent_slug: parent_slug.map(str::to_string),
    }
}

/// Демонстрационный каталог
pub fn demo_catalog() -> Vec<ContentEntity> {
    let mut data = vec![
        entity(ContentType::Category, "Электроника", "electronics", None),
        entity(ContentType::Category, "Одежда", "clothes", None),
        entity(ContentType::Category, "Дом и сад", "home-garden", None),
        entity(ContentType::SubCategory, "Смартфоны", "smartphones", Some("electronics")),
        entity(ContentType::SubCategory, "Ноутбуки", "laptops", Some("electronics")),
        entity(ContentType::SubCategory, "Куртки", "jackets", Some("clothes")),
        entity(ContentType::SubCategory, "Садовый инвентарь", "garden-tools", Some("home-garden")),
        entity(ContentType::Collection, "Весенняя распродажа", "spring-sale", None),
        entity(ContentType::Collection, "Новинки", "new-arrivals", None),
        entity(ContentType::Collection, "Хиты продаж", "bestsellers", None),
        entity(ContentType::Brand, "Acme", "acme", None),
        entity(ContentType::Brand, "Northwind", "northwind", None),
        entity(ContentType::Brand, "Contoso", "contoso", None),
    ];

    // Товаров больше одной страницы пикера, чтобы была видна подгрузка
    for n in 1..=45 {
        data.push(entity(
            ContentType::Product,
            &format!("Товар {:02}", n),
            &format!("product-{:02}", n),
            None,
        ));
    }
    data
}

/// Элементы каталога, которых ещё нет в базе (ключ: тип + slug)
pub fn missing_entities(
    catalog: Vec<ContentEntity>,
    existing: &HashSet<(String, String)>,
) -> Vec<ContentEntity> {
    catalog
        .into_iter()
        .filter(|e| !existing.contains(&(e.content_type.code().to_string(), e.slug.clone())))
        .collect()
}

/// Вставка тестовых данных; повторный вызов добавляет только недостающее
pub async fn insert_test_data() -> anyhow::Result<usize> {
    let existing = repository::existing_keys().await?;
    let data = missing_entities(demo_catalog(), &existing);
    for item in &data {
        repository::insert(item).await?;
    }
    tracing::info!("Inserted {} demo content entities", data.len());
    Ok(data.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog_covers_every_type() {
        let data = demo_catalog();
        for ct in ContentType::all() {
            assert!(data.iter().any(|e| e.content_type == ct), "{:?}", ct);
        }
        assert!(data.iter().filter(|e| e.content_type == ContentType::Product).count() > 20);
    }

    #[test]
    fn test_demo_catalog_has_no_unserved_images() {
        assert!(demo_catalog().iter().all(|e| e.image.is_none()));
    }

    #[test]
    fn test_missing_entities_skips_known_slugs() {
        let existing: HashSet<(String, String)> = [
            ("brand".to_string(), "acme".to_string()),
            ("product".to_string(), "product-01".to_string()),
        ]
        .into_iter()
        .collect();
        let catalog = demo_catalog();
        let total = catalog.len();
        let missing = missing_entities(catalog, &existing);
        assert_eq!(missing.len(), total - 2);
        assert!(!missing
            .iter()
            .any(|e| e.content_type == ContentType::Brand && e.slug == "acme"));
    }

    #[tokio::test]
    async fn test_seeding_twice_keeps_single_copy() {
        let db_path = std::env::temp_dir().join(format!("shopdesk-seed-{}.db", Uuid::new_v4()));
        crate::shared::data::db::initialize_database(&db_path)
            .await
            .unwrap();

        let first = insert_test_data().await.unwrap();
        assert_eq!(first, demo_catalog().len());
        let second = insert_test_data().await.unwrap();
        assert_eq!(second, 0);
        assert_eq!(count().await.unwrap(), first as u64);

        let brands = list(ContentType::Brand, None, None, Some("acme")).await.unwrap();
        assert_eq!(brands.total, 1);

        let _ = std::fs::remove_file(&db_path);
    }

    #[test]
    fn test_subcategories_have_parents() {
        assert!(demo_catalog()
            .iter()
            .filter(|e| e.content_type == ContentType::SubCategory)
            .all(|e| e.parent_slug.is_some()));
    }
}
