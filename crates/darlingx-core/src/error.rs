//! Error types for the site runtime.
//!
//! Each domain gets its own enum:
//!
//! - [`FetchError`] - Network/fetch errors for page HTML
//! - [`ResourceError`] - Style/script injection and load failures
//! - [`NavigationError`] - Fatal failures of a page transition
//! - [`StorageError`] - localStorage/sessionStorage operations
//! - [`ApiError`] - Quotes and auth endpoint failures
//! - [`CatalogError`] - Book catalog asset parsing

use thiserror::Error;

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Failed to create HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Network request failed (offline, CORS, etc.)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// HTTP error response (non-2xx status)
    #[error("HTTP error: {0}")]
    HttpError(u16),
    /// Failed to read response body
    #[error("Failed to read response")]
    ResponseReadFailed,
    /// Invalid response content (not text)
    #[error("Invalid response content")]
    InvalidContent,
    /// Request timed out
    #[error("Request timed out")]
    Timeout,
}

/// Failures while attaching a style or script to the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    /// The element could not be created or appended.
    #[error("failed to inject resource {url}")]
    Injection { url: String },
    /// The browser reported a load error for the element.
    #[error("failed to load resource {url}")]
    LoadFailed { url: String },
}

/// Fatal errors of a single navigation.
///
/// Every variant is recovered the same way: the controller gives up on the
/// in-app transition and lets the browser load the page conventionally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// Either the live page or the fetched page has no `<main>` region.
    #[error("main content region not found")]
    MissingMainRegion,
    #[error(transparent)]
    Resource(#[from] ResourceError),
    /// Initialization kept redirecting past the redirect limit.
    #[error("too many redirects")]
    TooManyRedirects,
}

/// Browser storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage not available")]
    Unavailable,
    #[error("failed to serialize value")]
    SerializationFailed,
    #[error("failed to write to storage")]
    WriteFailed,
}

/// Errors reported by the quotes/auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Missing or malformed input (HTTP 400, or rejected before sending).
    #[error("{0}")]
    Validation(String),
    /// Wrong credentials (HTTP 401).
    #[error("{0}")]
    Unauthorized(String),
    /// No active session (HTTP 403).
    #[error("{0}")]
    Forbidden(String),
    /// Email already registered (HTTP 409).
    #[error("{0}")]
    Conflict(String),
    /// Server-side failure (HTTP 5xx).
    #[error("server error: {0}")]
    Server(String),
    /// Any other non-success status.
    #[error("unexpected status {0}")]
    UnexpectedStatus(u16),
    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
    /// The request never completed.
    #[error("network error: {0}")]
    Network(String),
}

/// Book catalog asset errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("duplicate book id: {0}")]
    DuplicateId(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_error_from_fetch() {
        let err: NavigationError = FetchError::HttpError(404).into();
        assert_eq!(err, NavigationError::Fetch(FetchError::HttpError(404)));
        assert_eq!(err.to_string(), "HTTP error: 404");
    }

    #[test]
    fn test_navigation_error_from_resource() {
        let err: NavigationError = ResourceError::LoadFailed {
            url: "js/books.js".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "failed to load resource js/books.js");
    }

    #[test]
    fn test_too_many_redirects_message() {
        assert_eq!(NavigationError::TooManyRedirects.to_string(), "too many redirects");
    }

    #[test]
    fn test_api_error_messages_pass_through() {
        let err = ApiError::Conflict("Email already registered".to_string());
        assert_eq!(err.to_string(), "Email already registered");
    }
}
