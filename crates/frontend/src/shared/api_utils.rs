//! API utilities for frontend-backend communication
//!
//! Resolves the base URL of the remote product/inventory service.

/// Fallback used when neither a build-time override nor a browser window exists
pub const DEFAULT_API_BASE: &str = "http://localhost:3000";

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - `None` if window is not available
pub fn window_api_base() -> Option<String> {
    let location = web_sys::window()?.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    Some(format!("{}//{}:3000", protocol, hostname))
}

/// Pick the API base: explicit override, then window location, then default.
/// Trailing slashes are dropped so paths can be appended as `/product/1`.
pub fn resolve_api_base(override_url: Option<&str>, from_window: Option<String>) -> String {
    override_url
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .or(from_window)
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Build a full API URL from a base and a path
///
/// # Example
/// ```rust
/// use frontend::shared::api_utils::api_url;
/// assert_eq!(api_url("http://localhost:3000", "/product/1"), "http://localhost:3000/product/1");
/// ```
pub fn api_url(base: &str, path: &str) -> String {
    format!("{}{}", base, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_api_base() {
        assert_eq!(
            resolve_api_base(Some("https://api.example.com/"), Some("http://h:3000".into())),
            "https://api.example.com"
        );
        assert_eq!(
            resolve_api_base(Some("  "), Some("http://h:3000".into())),
            "http://h:3000"
        );
        assert_eq!(resolve_api_base(None, None), DEFAULT_API_BASE);
    }
}
