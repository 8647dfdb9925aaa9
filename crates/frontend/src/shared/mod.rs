pub mod api_client;
pub mod api_utils;
pub mod components;
pub mod config;
pub mod polling;

#[cfg(test)]
pub mod fake_storefront;
