use std::sync::Arc;

use chrono::{DateTime, Utc};
use contracts::shared::api_error::ApiError;
use contracts::system::auth::{Credential, LoginResponse};

use super::storage::TokenStorage;

/// Process-wide holder of the single bearer credential.
///
/// An expired or undecodable token is treated exactly like a missing one.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn TokenStorage + Send + Sync>,
}

impl SessionStore {
    pub fn new(storage: impl TokenStorage + Send + Sync + 'static) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    /// Startup check: returns the stored credential when it is still usable,
    /// otherwise wipes the stored token.
    pub fn restore(&self, now: DateTime<Utc>) -> Option<Credential> {
        let token = self.storage.load()?;
        match Credential::from_token(token) {
            Ok(credential) if credential.is_usable_at(now) => Some(credential),
            Ok(credential) => {
                log::info!("Stored token expired at {}, clearing", credential.expires_at);
                self.storage.clear();
                None
            }
            Err(e) => {
                log::warn!("Stored token is unreadable ({}), clearing", e);
                self.storage.clear();
                None
            }
        }
    }

    /// Decode the stored token's expiry and compare it with `now`
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.storage
            .load()
            .and_then(|token| Credential::from_token(token).ok())
            .map(|credential| credential.is_usable_at(now))
            .unwrap_or(false)
    }

    /// Accept a login response: extract, validate and persist its token
    pub fn establish(&self, response: &LoginResponse, now: DateTime<Utc>) -> Result<Credential, ApiError> {
        let token = response
            .token()
            .ok_or_else(|| ApiError::Auth("No token received".to_string()))?;
        let credential = Credential::from_token(token)
            .map_err(|e| ApiError::Auth(format!("Unusable token: {}", e)))?;
        if !credential.is_usable_at(now) {
            return Err(ApiError::Auth("Received an already expired token".to_string()));
        }
        self.storage.save(&credential.token);
        Ok(credential)
    }

    /// Raw stored token for the `Authorization` header
    pub fn token(&self) -> Option<String> {
        self.storage.load()
    }

    pub fn clear(&self) {
        self.storage.clear();
    }
}
