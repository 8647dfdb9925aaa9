use serde::{Deserialize, Serialize};

use crate::domain::a001_product::ProductId;

/// Остаток ниже этого значения считается низким
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Складской остаток товара.
///
/// Создаётся сервисом асинхронно после создания товара; клиент только читает.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Уровень остатка для бейджа в карточке товара
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    /// Записи нет (ещё не создана) или запрос завершился ошибкой
    Unknown,
    OutOfStock,
    Low,
    InStock,
}

impl StockLevel {
    /// Правила проверяются по порядку, первое совпадение выигрывает
    pub fn classify(record: Option<&InventoryRecord>) -> Self {
        match record {
            None => StockLevel::Unknown,
            Some(r) if r.quantity == 0 => StockLevel::OutOfStock,
            Some(r) if r.quantity < LOW_STOCK_THRESHOLD => StockLevel::Low,
            Some(_) => StockLevel::InStock,
        }
    }

    /// CSS-модификатор бейджа
    pub fn css_class(&self) -> &'static str {
        match self {
            StockLevel::Unknown => "error",
            StockLevel::OutOfStock => "out-of-stock",
            StockLevel::Low => "low-stock",
            StockLevel::InStock => "in-stock",
        }
    }
}
