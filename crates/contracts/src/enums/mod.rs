pub mod capacity;
pub mod category;
