use serde::{Deserialize, Serialize};

/// Тип контента, вокруг которого строится сетка
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ContentType {
    #[default]
    Product,
    Category,
    SubCategory,
    Collection,
    Brand,
}

impl ContentType {
    /// Код типа (совпадает с сериализованным значением)
    pub fn code(&self) -> &'static str {
        match self {
            ContentType::Product => "product",
            ContentType::Category => "category",
            ContentType::SubCategory => "subCategory",
            ContentType::Collection => "collection",
            ContentType::Brand => "brand",
        }
    }

    /// Человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            ContentType::Product => "Товары",
            ContentType::Category => "Категории",
            ContentType::SubCategory => "Подкатегории",
            ContentType::Collection => "Коллекции",
            ContentType::Brand => "Бренды",
        }
    }

    pub fn all() -> Vec<ContentType> {
        vec![
            ContentType::Product,
            ContentType::Category,
            ContentType::SubCategory,
            ContentType::Collection,
            ContentType::Brand,
        ]
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "product" => Some(ContentType::Product),
            "category" => Some(ContentType::Category),
            "subCategory" => Some(ContentType::SubCategory),
            "collection" => Some(ContentType::Collection),
            "brand" => Some(ContentType::Brand),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_serde() {
        for ct in ContentType::all() {
            let json = serde_json::to_string(&ct).unwrap();
            assert_eq!(json, format!("\"{}\"", ct.code()));
            assert_eq!(ContentType::from_code(ct.code()), Some(ct));
        }
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(ContentType::from_code("sub_category"), None);
    }
}
