use serde::{Deserialize, Serialize};

/// Поверхность витрины, к которой относится конфигурация
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Keyword {
    #[default]
    Home,
    Category,
    Cart,
}

impl Keyword {
    pub fn code(&self) -> &'static str {
        match self {
            Keyword::Home => "home",
            Keyword::Category => "category",
            Keyword::Cart => "cart",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Keyword::Home => "Главная",
            Keyword::Category => "Категория",
            Keyword::Cart => "Корзина",
        }
    }

    pub fn all() -> Vec<Keyword> {
        vec![Keyword::Home, Keyword::Category, Keyword::Cart]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "home" => Some(Keyword::Home),
            "category" => Some(Keyword::Category),
            "cart" => Some(Keyword::Cart),
            _ => None,
        }
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
