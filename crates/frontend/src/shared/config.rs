//! Application configuration
//!
//! Values are fixed at build time through environment variables
//! (`STOREFRONT_API_URL`, `STOREFRONT_CATALOG_WINDOW`, `STOREFRONT_POLL_MS`)
//! and provided to components through context.

use std::time::Duration;

use leptos::prelude::*;

use super::api_utils::{resolve_api_base, window_api_base};

pub const DEFAULT_CATALOG_WINDOW: u32 = 10;
pub const DEFAULT_INVENTORY_POLL_MS: u64 = 5_000;

pub const DEMO_EMAIL: &str = "admin@admin.com";
pub const DEMO_PASSWORD: &str = "12345678";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base: String,
    /// Number of contiguous product ids (1..=N) the catalog fetches
    pub catalog_window: u32,
    pub inventory_poll: Duration,
    pub demo_email: String,
    pub demo_password: String,
}

impl AppConfig {
    /// Build the configuration for the running browser session
    pub fn from_env() -> Self {
        Self::from_parts(
            option_env!("STOREFRONT_API_URL"),
            window_api_base(),
            option_env!("STOREFRONT_CATALOG_WINDOW"),
            option_env!("STOREFRONT_POLL_MS"),
        )
    }

    fn from_parts(
        api_override: Option<&str>,
        window_base: Option<String>,
        catalog_window: Option<&str>,
        poll_ms: Option<&str>,
    ) -> Self {
        Self {
            api_base: resolve_api_base(api_override, window_base),
            catalog_window: parse_positive(catalog_window).unwrap_or(DEFAULT_CATALOG_WINDOW),
            inventory_poll: Duration::from_millis(
                parse_positive(poll_ms).unwrap_or(DEFAULT_INVENTORY_POLL_MS),
            ),
            demo_email: DEMO_EMAIL.to_string(),
            demo_password: DEMO_PASSWORD.to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_parts(None, None, None, None)
    }
}

fn parse_positive<T>(raw: Option<&str>) -> Option<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    raw.and_then(|v| v.trim().parse::<T>().ok())
        .filter(|v| *v > T::default())
}

/// Hook to access the application configuration
pub fn use_config() -> AppConfig {
    use_context::<AppConfig>().expect("AppConfig not found in component tree")
}
