use std::sync::Arc;

use crate::app_shell::AppShell;
use crate::shared::api_client::{HttpStorefrontApi, SharedStorefront};
use crate::shared::config::AppConfig;
use crate::system::auth::context::SessionContext;
use crate::system::auth::session::SessionStore;
use crate::system::auth::storage::{LocalTokenStorage, MemoryTokenStorage};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_env();
    log::info!("Storefront API at {}", config.api_base);

    let store = if LocalTokenStorage::is_available() {
        SessionStore::new(LocalTokenStorage)
    } else {
        log::warn!("localStorage unavailable, session will not survive a reload");
        SessionStore::new(MemoryTokenStorage::default())
    };

    // Expired tokens are dropped here, before anything is rendered
    let session = SessionContext::restore(store.clone());

    let client = HttpStorefrontApi::new(config.api_base.clone(), store);
    {
        let session = session.clone();
        client.on_unauthorized().subscribe(move || session.invalidate());
    }
    let api: SharedStorefront = Arc::new(client);

    provide_context(config);
    provide_context(session);
    provide_context(api);

    view! {
        <AppShell />
    }
}
