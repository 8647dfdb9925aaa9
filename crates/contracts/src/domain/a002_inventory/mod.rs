pub mod aggregate;

pub use aggregate::{InventoryRecord, StockLevel, LOW_STOCK_THRESHOLD};
