//! In-memory [`StorefrontApi`] used by unit tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use contracts::domain::a001_product::{AddDetailsRequest, CategoryRef, Product, ProductId};
use contracts::domain::a002_inventory::InventoryRecord;
use contracts::enums::category::Category;
use contracts::shared::api_error::ApiError;
use contracts::system::auth::{LoginRequest, LoginResponse, RegisterRequest};

use super::api_client::StorefrontApi;

#[derive(Default)]
pub struct FakeStorefront {
    products: Mutex<BTreeMap<ProductId, Product>>,
    inventory: Mutex<HashMap<ProductId, u32>>,
    failures: Mutex<HashMap<&'static str, ApiError>>,
    calls: Mutex<Vec<&'static str>>,
    token: Mutex<Option<String>>,
}

impl FakeStorefront {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed products with the given ids, inactive and without details
    pub fn with_products(ids: &[i64]) -> Self {
        let fake = Self::new();
        if let Ok(mut products) = fake.products.lock() {
            for id in ids {
                products.insert(ProductId(*id), blank_product(ProductId(*id), Category::Computers));
            }
        }
        fake
    }

    pub fn set_inventory(&self, id: i64, quantity: u32) {
        self.inventory.lock().unwrap().insert(ProductId(id), quantity);
    }

    pub fn set_login_token(&self, token: impl Into<String>) {
        *self.token.lock().unwrap() = Some(token.into());
    }

    /// Make the next call to `operation` fail with `error`
    pub fn fail_next(&self, operation: &'static str, error: ApiError) {
        self.failures.lock().unwrap().insert(operation, error);
    }

    pub fn calls_to(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|name| **name == operation)
            .count()
    }

    fn enter(&self, operation: &'static str) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(operation);
        match self.failures.lock().unwrap().remove(operation) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn update_product(
        &self,
        id: ProductId,
        change: impl FnOnce(&mut Product),
    ) -> Result<Option<Product>, ApiError> {
        let mut products = self.products.lock().unwrap();
        let product = products.get_mut(&id).ok_or(ApiError::NotFound)?;
        change(product);
        Ok(Some(product.clone()))
    }
}

fn blank_product(id: ProductId, category: Category) -> Product {
    Product {
        id,
        title: None,
        code: None,
        description: None,
        category: Some(CategoryRef {
            id: category.id(),
            name: Some(category.display_name().to_string()),
        }),
        is_active: false,
        details: None,
    }
}

#[async_trait(?Send)]
impl StorefrontApi for FakeStorefront {
    async fn login(&self, _request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.enter("login")?;
        Ok(self
            .token
            .lock()
            .unwrap()
            .clone()
            .map(LoginResponse::with_token)
            .unwrap_or_default())
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<(), ApiError> {
        self.enter("register")
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        self.enter("get_product")?;
        self.products
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    async fn create_product(&self, category: Category) -> Result<ProductId, ApiError> {
        self.enter("create_product")?;
        let mut products = self.products.lock().unwrap();
        let next = products.keys().next_back().map(|id| id.0 + 1).unwrap_or(1);
        let id = ProductId(next);
        products.insert(id, blank_product(id, category));
        Ok(id)
    }

    async fn add_product_details(
        &self,
        id: ProductId,
        request: &AddDetailsRequest,
    ) -> Result<Option<Product>, ApiError> {
        self.enter("add_product_details")?;
        self.update_product(id, |product| {
            product.title = Some(request.title.clone());
            product.code = Some(request.code.clone());
            product.description = Some(request.description.clone());
            product.details = Some(request.details.clone());
        })
    }

    async fn activate_product(&self, id: ProductId) -> Result<Option<Product>, ApiError> {
        self.enter("activate_product")?;
        self.update_product(id, |product| product.is_active = true)
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        self.enter("delete_product")?;
        self.products
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(ApiError::NotFound)
    }

    async fn get_inventory(&self, product_id: ProductId) -> Result<InventoryRecord, ApiError> {
        self.enter("get_inventory")?;
        self.inventory
            .lock()
            .unwrap()
            .get(&product_id)
            .map(|quantity| InventoryRecord {
                product_id,
                quantity: *quantity,
            })
            .ok_or(ApiError::NotFound)
    }
}
