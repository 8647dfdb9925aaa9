use chrono::Utc;
use contracts::shared::api_error::ApiError;
use contracts::system::auth::{Credential, LoginRequest};
use leptos::prelude::*;

use super::session::SessionStore;
use crate::shared::api_client::StorefrontApi;

/// Reactive view of the session, provided to the whole app via context.
///
/// `credential` is the only thing the auth gate looks at; every change to
/// the stored token goes through this type so both stay in sync.
#[derive(Clone)]
pub struct SessionContext {
    pub credential: RwSignal<Option<Credential>>,
    store: SessionStore,
}

impl SessionContext {
    /// Restore the session from storage, dropping an expired token
    pub fn restore(store: SessionStore) -> Self {
        let credential = store.restore(Utc::now());
        match &credential {
            Some(c) => log::info!("Session restored, expires at {}", c.expires_at),
            None => log::info!("No active session"),
        }
        Self {
            credential: RwSignal::new(credential),
            store,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Reactive: true while a credential is held and not yet expired
    pub fn is_authenticated(&self) -> bool {
        self.credential.with(|c| {
            c.as_ref()
                .map(|c| c.is_usable_at(Utc::now()))
                .unwrap_or(false)
        })
    }

    pub async fn login<A>(&self, api: &A, email: String, password: String) -> Result<(), ApiError>
    where
        A: StorefrontApi + ?Sized,
    {
        let response = api.login(&LoginRequest { email, password }).await?;
        let credential = self.store.establish(&response, Utc::now())?;
        log::info!("Logged in, token expires at {}", credential.expires_at);
        self.credential.set(Some(credential));
        Ok(())
    }

    /// Create the account, then sign in with the same credentials
    pub async fn register<A>(&self, api: &A, email: String, password: String) -> Result<(), ApiError>
    where
        A: StorefrontApi + ?Sized,
    {
        api.register(&LoginRequest {
            email: email.clone(),
            password: password.clone(),
        })
        .await?;
        log::info!("Registered {}", email);
        self.login(api, email, password).await
    }

    pub fn logout(&self) {
        self.store.clear();
        self.credential.set(None);
        log::info!("Logged out");
    }

    /// Server rejected the token; drop it and fall back to the login view
    pub fn invalidate(&self) {
        log::warn!("Session rejected by server, signing out");
        self.store.clear();
        let _ = self.credential.try_set(None);
    }
}

/// Hook to access the session
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext not found in component tree")
}
