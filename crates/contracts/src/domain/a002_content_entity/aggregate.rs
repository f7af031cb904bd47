use serde::{Deserialize, Serialize};

use crate::enums::content_type::ContentType;

/// Элемент каталога, который можно привязать к ячейке сетки
/// (товар, категория, подкатегория, коллекция или бренд)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentEntity {
    pub id: String,
    #[serde(rename = "contentType")]
    pub content_type: ContentType,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    /// Slug родительской категории, заполнен только у подкатегорий
    #[serde(rename = "parentSlug", default)]
    pub parent_slug: Option<String>,
}

/// Ссылка на витрину для выбранного элемента
pub fn build_link(content_type: ContentType, entity: &ContentEntity) -> String {
    match content_type {
        ContentType::Product => format!("/product/{}", entity.slug),
        ContentType::Category => format!("/category/{}", entity.slug),
        ContentType::SubCategory => match entity.parent_slug.as_deref() {
            Some(parent) if !parent.is_empty() => {
                format!("/category/{}/{}", parent, entity.slug)
            }
            _ => format!("/category/{}", entity.slug),
        },
        ContentType::Collection => format!("/collection/{}", entity.slug),
        ContentType::Brand => format!("/brand/{}", entity.slug),
    }
}

/// Результат выбора в пикере контента: всё, что нужно записать в ячейку
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSelection {
    #[serde(rename = "itemId")]
    pub item_id: String,
    pub link: String,
    pub image: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
}

impl ContentSelection {
    pub fn from_entity(content_type: ContentType, entity: &ContentEntity) -> Self {
        Self {
            item_id: entity.id.clone(),
            link: build_link(content_type, entity),
            image: entity.image.clone(),
            name: entity.name.clone(),
            content_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(slug: &str, parent: Option<&str>) -> ContentEntity {
        ContentEntity {
            id: "42".into(),
            content_type: ContentType::Product,
            name: "Кроссовки".into(),
            slug: slug.into(),
            image: Some("https://cdn.example.com/a.png".into()),
            parent_slug: parent.map(Into::into),
        }
    }

    #[test]
    fn test_build_link_per_type() {
        let e = entity("air-max", Some("shoes"));
        assert_eq!(build_link(ContentType::Product, &e), "/product/air-max");
        assert_eq!(build_link(ContentType::Category, &e), "/category/air-max");
        assert_eq!(
            build_link(ContentType::SubCategory, &e),
            "/category/shoes/air-max"
        );
        assert_eq!(build_link(ContentType::Collection, &e), "/collection/air-max");
        assert_eq!(build_link(ContentType::Brand, &e), "/brand/air-max");
    }

    #[test]
    fn test_subcategory_without_parent() {
        let e = entity("socks", None);
        assert_eq!(build_link(ContentType::SubCategory, &e), "/category/socks");
    }

    #[test]
    fn test_selection_from_entity() {
        let e = entity("nike", None);
        let sel = ContentSelection::from_entity(ContentType::Brand, &e);
        assert_eq!(sel.item_id, "42");
        assert_eq!(sel.link, "/brand/nike");
        assert_eq!(sel.name, "Кроссовки");
        assert_eq!(sel.content_type, ContentType::Brand);
        assert_eq!(sel.image.as_deref(), Some("https://cdn.example.com/a.png"));
    }
}
