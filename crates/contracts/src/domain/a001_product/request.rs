use serde::{Deserialize, Serialize};

use super::aggregate::{ProductAttributes, ProductId};
use crate::enums::category::Category;

/// Тело запроса `POST /product/create`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub category_id: Category,
}

/// Ответ на создание товара: нужен только идентификатор
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedProduct {
    pub id: ProductId,
}

/// Тело запроса `POST /product/{id}/details`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDetailsRequest {
    pub title: String,
    pub code: String,
    pub variation_type: String,
    pub description: String,
    pub about: Vec<String>,
    pub details: ProductAttributes,
}

impl AddDetailsRequest {
    pub const VARIATION_NONE: &'static str = "NONE";

    pub fn default_about() -> Vec<String> {
        vec![
            "High quality product".to_string(),
            "Fast shipping".to_string(),
        ]
    }
}
