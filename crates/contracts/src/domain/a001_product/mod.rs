pub mod aggregate;
pub mod request;

pub use aggregate::{CategoryRef, Product, ProductAttributes, ProductId};
pub use request::{AddDetailsRequest, CreateProductRequest, CreatedProduct};
