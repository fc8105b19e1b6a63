//! # Shared Utility Functions
//!
//! URL and display helpers used by the studio client.
//!
//! ## Media URLs
//!
//! The backend returns result references either as absolute URLs or as paths
//! relative to its own origin (e.g. `/static/results/42.png`). The origin is the
//! API base URL without its versioned API prefix:
//!
//! ```rust
//! use shared::utils::{absolute_media_url, backend_origin};
//!
//! let origin = backend_origin("http://host:8000/api/v1");
//! assert_eq!(origin, "http://host:8000");
//! assert_eq!(absolute_media_url(&origin, "/static/r.png"), "http://host:8000/static/r.png");
//! ```

/// Versioned prefix every API path lives under.
pub const API_PREFIX: &str = "/api/v1";

/// Derive the media origin from an API base URL by stripping [`API_PREFIX`]
/// and any trailing slash.
pub fn backend_origin(api_base: &str) -> String {
    let trimmed = api_base.trim_end_matches('/');
    trimmed
        .strip_suffix(API_PREFIX)
        .unwrap_or(trimmed)
        .trim_end_matches('/')
        .to_string()
}

/// Make a media reference absolute.
///
/// References that already carry a scheme are returned unchanged. Relative
/// references are joined onto `origin` with exactly one slash between them.
///
/// # Examples
///
/// ```rust
/// use shared::utils::absolute_media_url;
///
/// assert_eq!(absolute_media_url("http://host:8000", "static/r.png"), "http://host:8000/static/r.png");
/// assert_eq!(absolute_media_url("http://host:8000", "https://cdn/x.mp4"), "https://cdn/x.mp4");
/// ```
pub fn absolute_media_url(origin: &str, reference: &str) -> String {
    if reference.starts_with("http://") || reference.starts_with("https://") {
        return reference.to_string();
    }
    let origin = origin.trim_end_matches('/');
    let path = reference.trim_start_matches('/');
    format!("{}/{}", origin, path)
}

/// Format a whole-unit price with its currency symbol.
///
/// ```rust
/// use shared::utils::format_price;
///
/// assert_eq!(format_price(29, "USD"), "$29");
/// assert_eq!(format_price(2499, "INR"), "₹2499");
/// assert_eq!(format_price(5, "EUR"), "5 EUR");
/// ```
pub fn format_price(amount: i64, currency: &str) -> String {
    match currency.to_ascii_uppercase().as_str() {
        "USD" => format!("${}", amount),
        "INR" => format!("₹{}", amount),
        other => format!("{} {}", amount, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_origin_strips_api_prefix() {
        assert_eq!(backend_origin("http://localhost:8000/api/v1"), "http://localhost:8000");
        assert_eq!(backend_origin("http://localhost:8000/api/v1/"), "http://localhost:8000");
    }

    #[test]
    fn test_backend_origin_without_prefix() {
        assert_eq!(backend_origin("https://swap.example.com/"), "https://swap.example.com");
    }

    #[test]
    fn test_absolute_media_url_relative() {
        assert_eq!(
            absolute_media_url("http://host:8000", "/static/r.png"),
            "http://host:8000/static/r.png"
        );
        assert_eq!(
            absolute_media_url("http://host:8000/", "/static/r.png"),
            "http://host:8000/static/r.png"
        );
    }

    #[test]
    fn test_absolute_media_url_passthrough() {
        assert_eq!(
            absolute_media_url("http://host:8000", "https://cdn.example.com/r.png"),
            "https://cdn.example.com/r.png"
        );
    }
}
