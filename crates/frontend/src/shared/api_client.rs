//! Remote service client
//!
//! Components depend on the [`StorefrontApi`] trait; the browser build uses
//! [`HttpStorefrontApi`], which attaches the stored bearer token to every
//! authenticated call and reports 401 responses through [`UnauthorizedHook`].

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use contracts::domain::a001_product::{
    AddDetailsRequest, CreateProductRequest, CreatedProduct, Product, ProductId,
};
use contracts::domain::a002_inventory::InventoryRecord;
use contracts::enums::category::Category;
use contracts::shared::api_error::ApiError;
use contracts::shared::envelope::ApiEnvelope;
use contracts::system::auth::{LoginRequest, LoginResponse, RegisterRequest};
use gloo_net::http::{Request, RequestBuilder};
use leptos::prelude::*;
use serde::de::DeserializeOwned;

use super::api_utils::api_url;
use crate::system::auth::session::SessionStore;

/// Operations of the remote product/inventory service
#[async_trait(?Send)]
pub trait StorefrontApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError>;

    /// `ApiError::NotFound` is a normal outcome for ids that do not exist
    async fn get_product(&self, id: ProductId) -> Result<Product, ApiError>;

    async fn create_product(&self, category: Category) -> Result<ProductId, ApiError>;

    /// Returns the updated product when the service echoes it back
    async fn add_product_details(
        &self,
        id: ProductId,
        request: &AddDetailsRequest,
    ) -> Result<Option<Product>, ApiError>;

    async fn activate_product(&self, id: ProductId) -> Result<Option<Product>, ApiError>;

    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError>;

    /// `ApiError::NotFound` until the service has created the record
    async fn get_inventory(&self, product_id: ProductId) -> Result<InventoryRecord, ApiError>;
}

pub type SharedStorefront = Arc<dyn StorefrontApi + Send + Sync>;

/// Hook to access the remote service client
pub fn use_storefront() -> SharedStorefront {
    use_context::<SharedStorefront>().expect("StorefrontApi not found in component tree")
}

// ============================================================================
// Unauthorized event
// ============================================================================

type Subscriber = Arc<dyn Fn() + Send + Sync>;

/// Single-subscriber event fired when an authenticated call returns 401.
/// Subscribing again replaces the previous subscriber.
#[derive(Clone, Default)]
pub struct UnauthorizedHook {
    subscriber: Arc<Mutex<Option<Subscriber>>>,
}

impl UnauthorizedHook {
    pub fn subscribe(&self, handler: impl Fn() + Send + Sync + 'static) {
        if let Ok(mut slot) = self.subscriber.lock() {
            *slot = Some(Arc::new(handler));
        }
    }

    pub fn emit(&self) {
        // release the lock before running the handler
        let subscriber = self.subscriber.lock().ok().and_then(|slot| slot.clone());
        match subscriber {
            Some(handler) => handler(),
            None => log::warn!("401 received but nobody is subscribed to it"),
        }
    }
}

// ============================================================================
// Response decoding
// ============================================================================

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn expect_success(status: u16, body: &str) -> Result<(), ApiError> {
    if is_success(status) {
        Ok(())
    } else {
        Err(ApiError::from_response(status, body))
    }
}

fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    expect_success(status, body)?;
    serde_json::from_str(body).map_err(|e| {
        log::error!("Unexpected response body (HTTP {}): {}", status, e);
        ApiError::Network {
            status: Some(status),
            message: None,
        }
    })
}

/// Like [`decode_response`], but an unreadable success body is `None`
fn decode_optional<T: DeserializeOwned>(status: u16, body: &str) -> Result<Option<T>, ApiError> {
    expect_success(status, body)?;
    Ok(serde_json::from_str(body).ok())
}

// ============================================================================
// HTTP implementation
// ============================================================================

#[derive(Clone, Copy, Debug)]
enum Verb {
    Get,
    Post,
    Delete,
}

#[derive(Clone)]
pub struct HttpStorefrontApi {
    base_url: String,
    session: SessionStore,
    unauthorized: UnauthorizedHook,
}

impl HttpStorefrontApi {
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Self {
        Self {
            base_url: base_url.into(),
            session,
            unauthorized: UnauthorizedHook::default(),
        }
    }

    pub fn on_unauthorized(&self) -> &UnauthorizedHook {
        &self.unauthorized
    }

    fn builder(&self, verb: Verb, path: &str, authenticated: bool) -> RequestBuilder {
        let url = api_url(&self.base_url, path);
        let builder = match verb {
            Verb::Get => Request::get(&url),
            Verb::Post => Request::post(&url),
            Verb::Delete => Request::delete(&url),
        }
        .header("Accept", "application/json");

        match self.session.token() {
            Some(token) if authenticated => {
                builder.header("Authorization", &format!("Bearer {}", token))
            }
            _ => builder,
        }
    }

    /// Send a request and return status and raw body
    async fn call(
        &self,
        verb: Verb,
        path: &str,
        body: Option<serde_json::Value>,
        authenticated: bool,
    ) -> Result<(u16, String), ApiError> {
        let builder = self.builder(verb, path, authenticated);
        let sent = match body {
            Some(body) => {
                let request = builder.json(&body).map_err(|e| {
                    log::error!("Failed to serialize request for {}: {}", path, e);
                    ApiError::transport()
                })?;
                request.send().await
            }
            None => builder.send().await,
        };
        let response = sent.map_err(|e| {
            log::error!("{:?} {} failed: {}", verb, path, e);
            ApiError::transport()
        })?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        log::debug!("{:?} {} -> {}", verb, path, status);
        Ok((status, text))
    }

    async fn authorized(
        &self,
        verb: Verb,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<(u16, String), ApiError> {
        let (status, text) = self.call(verb, path, body, true).await?;
        self.reject_unauthorized(status)?;
        Ok((status, text))
    }

    /// 401 on an authenticated call ends the session
    fn reject_unauthorized(&self, status: u16) -> Result<(), ApiError> {
        if status == 401 {
            return self.settle(Err(ApiError::PermissionDenied));
        }
        Ok(())
    }

    /// Apply the global permission-denied rule to a finished call
    fn settle<T>(&self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(ApiError::PermissionDenied) = &result {
            log::warn!("401 Unauthorized - token expired or revoked");
            self.session.clear();
            self.unauthorized.emit();
        }
        result
    }
}

fn to_body<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|e| {
        log::error!("Failed to serialize request: {}", e);
        ApiError::transport()
    })
}

#[async_trait(?Send)]
impl StorefrontApi for HttpStorefrontApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let (status, text) = self
            .call(Verb::Post, "/auth/login", Some(to_body(request)?), false)
            .await?;
        decode_response(status, &text).map_err(ApiError::into_auth)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let (status, text) = self
            .call(Verb::Post, "/auth/register", Some(to_body(request)?), false)
            .await?;
        expect_success(status, &text).map_err(ApiError::into_auth)
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        let (status, text) = self
            .authorized(Verb::Get, &format!("/product/{}", id), None)
            .await?;
        decode_response::<ApiEnvelope<Option<Product>>>(status, &text)?
            .into_inner()
            .ok_or(ApiError::NotFound)
    }

    async fn create_product(&self, category: Category) -> Result<ProductId, ApiError> {
        let body = to_body(&CreateProductRequest {
            category_id: category,
        })?;
        let (status, text) = self
            .authorized(Verb::Post, "/product/create", Some(body))
            .await?;
        let created: ApiEnvelope<CreatedProduct> = decode_response(status, &text)?;
        Ok(created.into_inner().id)
    }

    async fn add_product_details(
        &self,
        id: ProductId,
        request: &AddDetailsRequest,
    ) -> Result<Option<Product>, ApiError> {
        let (status, text) = self
            .authorized(
                Verb::Post,
                &format!("/product/{}/details", id),
                Some(to_body(request)?),
            )
            .await?;
        Ok(decode_optional::<ApiEnvelope<Product>>(status, &text)?.map(ApiEnvelope::into_inner))
    }

    async fn activate_product(&self, id: ProductId) -> Result<Option<Product>, ApiError> {
        let (status, text) = self
            .authorized(Verb::Post, &format!("/product/{}/activate", id), None)
            .await?;
        Ok(decode_optional::<ApiEnvelope<Product>>(status, &text)?.map(ApiEnvelope::into_inner))
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        let (status, text) = self
            .authorized(Verb::Delete, &format!("/product/{}", id), None)
            .await?;
        expect_success(status, &text)
    }

    async fn get_inventory(&self, product_id: ProductId) -> Result<InventoryRecord, ApiError> {
        let (status, text) = self
            .authorized(Verb::Get, &format!("/inventory/product/{}", product_id), None)
            .await?;
        decode_response::<ApiEnvelope<Option<InventoryRecord>>>(status, &text)?
            .into_inner()
            .ok_or(ApiError::NotFound)
    }
}
