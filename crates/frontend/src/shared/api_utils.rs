//! API utilities for frontend-backend communication
//!
//! The backend address is fixed at build time:
//! `DOC_CHAT_API_URL=https://chat.example.com trunk build --release`

/// Address used when `DOC_CHAT_API_URL` is not set during the build.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Get the base URL for API requests, without a trailing slash.
pub fn api_base() -> String {
    normalize_base(option_env!("DOC_CHAT_API_URL").unwrap_or(DEFAULT_API_BASE))
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust
/// use frontend::shared::api_utils::api_url;
///
/// let url = api_url("/chat");
/// assert!(url.ends_with("/chat"));
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

fn normalize_base(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("http://localhost:8000"), "http://localhost:8000");
        assert_eq!(normalize_base("https://api.example.com/"), "https://api.example.com");
        assert_eq!(normalize_base(" https://api.example.com// "), "https://api.example.com");
    }

    #[test]
    fn test_empty_base_falls_back() {
        assert_eq!(normalize_base(""), DEFAULT_API_BASE);
        assert_eq!(normalize_base("/"), DEFAULT_API_BASE);
    }

    #[test]
    fn test_api_url_joins_path() {
        assert!(api_url("/upload").ends_with("/upload"));
        assert!(!api_url("/upload").contains("//upload"));
    }
}
