//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use contracts::shared::grid::GridConfig;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using the configured backend port.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base(config: &GridConfig) -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, config.api.port)
}

/// Base of the controller routes, e.g. "http://localhost:3000/api"
///
/// # Example
/// ```rust,ignore
/// let routes = a001_translation_record::routes(&controller_base(&config));
/// ```
pub fn controller_base(config: &GridConfig) -> String {
    format!("{}{}", api_base(config), config.api.controller_prefix)
}
