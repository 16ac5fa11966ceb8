//! GraphQL-specific error types for the Monday.com API client.
//!
//! - [`GraphqlError::Http`]: transport failures (network, non-2xx status)
//! - [`GraphqlError::Remote`]: GraphQL-level errors reported by the service
//! - [`GraphqlError::Decode`]: the response did not have the expected shape
//! - [`GraphqlError::MissingData`]: no `data` and no `errors`

use crate::clients::HttpError;
use thiserror::Error;

/// GraphQL-level errors reported by the service.
///
/// Raised whenever the response carries a non-empty `errors` array, even if
/// `data` is also present.
///
/// # Example
///
/// ```rust
/// use monday_api::clients::graphql::RemoteError;
///
/// let error = RemoteError::new(vec!["Board not found".into(), "Invalid id".into()]);
/// assert_eq!(error.to_string(), "GraphQL errors: Board not found; Invalid id");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("GraphQL errors: {}", .messages.join("; "))]
pub struct RemoteError {
    /// The error messages, in response order.
    pub messages: Vec<String>,
    /// Error codes from `extensions.code` or `error_code`, when present.
    pub codes: Vec<String>,
}

impl RemoteError {
    /// Creates a remote error from messages alone.
    #[must_use]
    pub const fn new(messages: Vec<String>) -> Self {
        Self {
            messages,
            codes: Vec::new(),
        }
    }
}

/// Error type for GraphQL API operations.
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The service reported GraphQL errors.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// The response body could not be decoded into the expected shape.
    #[error("Unexpected GraphQL response shape: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response contained neither `data` nor `errors`.
    #[error("GraphQL response contained no data")]
    MissingData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;

    #[test]
    fn test_remote_error_joins_messages() {
        let error = GraphqlError::Remote(RemoteError::new(vec!["a".into(), "b".into()]));
        assert_eq!(error.to_string(), "GraphQL errors: a; b");
    }

    #[test]
    fn test_from_http_error_conversion() {
        let http_error = HttpError::Response(HttpResponseError::new(
            401,
            "Not Authenticated".to_string(),
            None,
            None,
        ));

        let graphql_error: GraphqlError = http_error.into();

        assert!(matches!(graphql_error, GraphqlError::Http(_)));
        assert!(graphql_error.to_string().contains("authentication failed"));
    }

    #[test]
    fn test_all_error_variants_implement_std_error() {
        let remote: &dyn std::error::Error = &GraphqlError::Remote(RemoteError::new(vec![]));
        let _ = remote;
        let missing: &dyn std::error::Error = &GraphqlError::MissingData;
        let _ = missing;
    }
}
