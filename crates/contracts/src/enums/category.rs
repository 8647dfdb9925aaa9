use serde::{Deserialize, Serialize};

/// Категории товаров, которые принимает сервис при создании товара
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Category {
    Computers,
    Fashion,
}

impl Category {
    /// Числовой идентификатор категории на стороне сервиса
    pub fn id(&self) -> i64 {
        match self {
            Category::Computers => 1,
            Category::Fashion => 2,
        }
    }

    /// Получить человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Computers => "Computers",
            Category::Fashion => "Fashion",
        }
    }

    /// Получить все категории
    pub fn all() -> Vec<Category> {
        vec![Category::Computers, Category::Fashion]
    }

    /// Парсинг значения из `<select>` (строковый id категории)
    pub fn from_code(code: &str) -> Option<Self> {
        code.trim()
            .parse::<i64>()
            .ok()
            .and_then(|id| Category::try_from(id).ok())
    }
}

impl TryFrom<i64> for Category {
    type Error = String;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Category::Computers),
            2 => Ok(Category::Fashion),
            other => Err(format!("Unknown category id: {}", other)),
        }
    }
}

impl From<Category> for i64 {
    fn from(category: Category) -> Self {
        category.id()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
