use std::sync::Mutex;

use web_sys::window;

const TOKEN_KEY: &str = "token";

/// Durable place for the single bearer token
pub trait TokenStorage {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Browser `localStorage`; survives reloads
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalTokenStorage;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

impl LocalTokenStorage {
    pub fn is_available() -> bool {
        get_local_storage().is_some()
    }
}

impl TokenStorage for LocalTokenStorage {
    fn load(&self) -> Option<String> {
        get_local_storage()?.get_item(TOKEN_KEY).ok()?
    }

    fn save(&self, token: &str) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.set_item(TOKEN_KEY, token);
        }
    }

    fn clear(&self) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}

/// In-memory storage, used when `localStorage` is unavailable and in tests
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStorage {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Option<String> {
        self.token.lock().ok()?.clone()
    }

    fn save(&self, token: &str) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }
}
