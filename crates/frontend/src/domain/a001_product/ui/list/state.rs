use contracts::domain::a001_product::{Product, ProductId};
use futures::future::join_all;

use crate::shared::api_client::StorefrontApi;

/// Contiguous range of product ids fetched on every refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogWindow {
    pub size: u32,
}

impl CatalogWindow {
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    pub fn ids(&self) -> impl Iterator<Item = ProductId> {
        (1..=i64::from(self.size)).map(ProductId)
    }
}

/// Fetch every id of the window at once and keep the ones that resolved.
///
/// A failed fetch means "no product here"; the result keeps the requested
/// id order no matter in which order the responses complete.
pub async fn fetch_window<A>(api: &A, window: CatalogWindow) -> Vec<Product>
where
    A: StorefrontApi + ?Sized,
{
    let requests = window.ids().map(|id| async move { (id, api.get_product(id).await) });
    join_all(requests)
        .await
        .into_iter()
        .filter_map(|(id, result)| match result {
            Ok(product) => Some(product),
            Err(e) if e.is_not_found() => None,
            Err(e) => {
                log::debug!("Product {} skipped: {}", id, e);
                None
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogView {
    /// Nothing loaded yet and a fetch is running
    Loading,
    Empty,
    Items,
}

/// Catalog list state; overlapping refreshes resolve to the latest one
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogState {
    products: Vec<Product>,
    loading: bool,
    latest_request: u64,
    error: Option<String>,
}

impl CatalogState {
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Start a refresh; previously loaded products stay visible meanwhile
    pub fn begin_refresh(&mut self) -> u64 {
        self.latest_request += 1;
        self.loading = true;
        self.latest_request
    }

    /// Apply a finished refresh; results of superseded refreshes are dropped
    pub fn finish_refresh(&mut self, request: u64, products: Vec<Product>) -> bool {
        if request != self.latest_request {
            return false;
        }
        self.products = products;
        self.loading = false;
        self.error = None;
        true
    }

    pub fn view(&self) -> CatalogView {
        match (self.products.is_empty(), self.loading) {
            (true, true) => CatalogView::Loading,
            (true, false) => CatalogView::Empty,
            (false, _) => CatalogView::Items,
        }
    }
}
