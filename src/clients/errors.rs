//! HTTP-specific error types for the Monday.com API client.
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the API
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use monday_api::clients::HttpError;
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Hint attached to 401 responses.
pub const AUTHENTICATION_HINT: &str =
    "authentication failed; check that the active profile's API token is valid";

/// Hint attached to 429 responses.
pub const RATE_LIMIT_HINT: &str = "rate limit exceeded; wait before sending more requests";

/// Error returned when an HTTP request receives a non-successful response.
///
/// 401 and 429 responses carry a `hint` describing the likely cause. The
/// hint is informational; the request is never retried.
///
/// # Example
///
/// ```rust
/// use monday_api::clients::HttpResponseError;
///
/// let error = HttpResponseError::new(401, "Not Authenticated".to_string(), None, None);
/// assert!(error.to_string().contains("authentication failed"));
/// ```
#[derive(Debug, Error)]
#[error("HTTP {code}: {message}{}", .hint.as_deref().map(|h| format!(" ({h})")).unwrap_or_default())]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Error message extracted from the response body.
    pub message: String,
    /// Explanation for well-known status codes.
    pub hint: Option<String>,
    /// Request ID from the `X-Request-Id` header, if present.
    pub error_reference: Option<String>,
}

impl HttpResponseError {
    /// Creates a response error, attaching a hint for 401 and 429.
    ///
    /// `retry_after` (seconds) is appended to the 429 hint when known.
    #[must_use]
    pub fn new(
        code: u16,
        message: String,
        error_reference: Option<String>,
        retry_after: Option<f64>,
    ) -> Self {
        let hint = match code {
            401 => Some(AUTHENTICATION_HINT.to_string()),
            429 => Some(retry_after.map_or_else(
                || RATE_LIMIT_HINT.to_string(),
                |secs| format!("{RATE_LIMIT_HINT} (retry after {secs} seconds)"),
            )),
            _ => None,
        };
        Self {
            code,
            message,
            hint,
            error_reference,
        }
    }

    /// Returns `true` for a 401 response.
    #[must_use]
    pub const fn is_authentication_failure(&self) -> bool {
        self.code == 401
    }

    /// Returns `true` for a 429 response.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        self.code == 429
    }
}

/// Error returned when an HTTP request fails validation before sending.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The request body is not a JSON object.
    #[error("GraphQL request body must be a JSON object.")]
    BodyNotObject,

    /// The request body carries no query text.
    #[error("GraphQL request body must contain a non-empty 'query' string.")]
    MissingQuery,
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
