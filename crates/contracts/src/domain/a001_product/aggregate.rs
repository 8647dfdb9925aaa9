use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::capacity::{CapacityType, CapacityUnit};

// ============================================================================
// ID Type
// ============================================================================

/// Идентификатор товара (целое число >= 1, выдаётся сервисом)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl ProductId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Ссылка на категорию в ответе сервиса
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

/// Характеристики товара (шаг "детали" мастера создания)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAttributes {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub series: String,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub capacity_unit: CapacityUnit,
    #[serde(default)]
    pub capacity_type: CapacityType,
}

/// Товар в том виде, в котором его возвращает сервис.
///
/// Только что созданный товар не имеет названия, кода и характеристик,
/// поэтому все описательные поля необязательные.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient_attributes")]
    pub details: Option<ProductAttributes>,
}

impl Product {
    /// Заголовок карточки: название или `Product #id`
    pub fn display_title(&self) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!("Product #{}", self.id),
        }
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().and_then(|c| c.name.as_deref())
    }
}

/// Характеристики, которые не удаётся разобрать, считаются отсутствующими,
/// чтобы карточка товара всё равно отобразилась.
fn lenient_attributes<'de, D>(deserializer: D) -> Result<Option<ProductAttributes>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_product_deserializes() {
        let product: Product =
            serde_json::from_str(r#"{"id": 7, "isActive": false, "category": {"id": 1}}"#)
                .unwrap();
        assert_eq!(product.id, ProductId(7));
        assert!(!product.is_active);
        assert_eq!(product.details, None);
        assert_eq!(product.display_title(), "Product #7");
        assert_eq!(product.category_name(), None);
    }

    #[test]
    fn test_detailed_product_deserializes() {
        let json = r#"{
            "id": 3,
            "title": "Laptop",
            "code": "LP-3",
            "description": "Fast",
            "isActive": true,
            "category": {"id": 1, "name": "Computers"},
            "details": {
                "category": "Computers",
                "brand": "Acme",
                "series": "X",
                "capacity": 512,
                "capacityUnit": "GB",
                "capacityType": "SSD"
            }
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.display_title(), "Laptop");
        assert_eq!(product.category_name(), Some("Computers"));
        let details = product.details.unwrap();
        assert_eq!(details.capacity, 512);
        assert_eq!(details.capacity_unit, CapacityUnit::GB);
    }

    #[test]
    fn test_unreadable_details_are_absent() {
        let product: Product =
            serde_json::from_str(r#"{"id": 4, "details": {"capacityUnit": "PB"}}"#).unwrap();
        assert_eq!(product.details, None);
    }

    #[test]
    fn test_product_id_is_a_bare_integer() {
        let id: ProductId = serde_json::from_str("12").unwrap();
        assert_eq!(id, ProductId(12));
        assert_eq!(id.to_string(), "12");
        assert_eq!(serde_json::to_string(&id).unwrap(), "12");
    }
}
