//! Error type for the operations façade.
//!
//! Every variant except [`MondayError::Configuration`] carries a context
//! string naming the operation and the ids it was called with, e.g.
//! `update_item: item 123 on board 456`.

use thiserror::Error;

use crate::clients::graphql::{GraphqlError, RemoteError};
use crate::clients::HttpError;
use crate::error::ConfigError;
use crate::query::ArgumentError;

/// Errors returned by [`MondayClient`](crate::api::MondayClient) operations.
#[derive(Debug, Error)]
pub enum MondayError {
    /// A client could not be obtained, e.g. [`Session::client`] with no
    /// active profile.
    ///
    /// Converts from [`ConfigError`] so one `?` chain can cover profile
    /// activation and the operations that follow.
    ///
    /// [`Session::client`]: crate::auth::Session::client
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// An argument failed validation before the request was built.
    #[error("{context}: {source}")]
    InvalidArgument {
        /// The operation and its identifying parameters.
        context: String,
        /// The validation failure.
        source: ArgumentError,
    },

    /// The service reported GraphQL errors.
    #[error("{context}: {source}")]
    Remote {
        /// The operation and its identifying parameters.
        context: String,
        /// The reported errors.
        source: RemoteError,
    },

    /// The request could not be delivered or got a non-2xx status.
    #[error("{context}: {source}")]
    Transport {
        /// The operation and its identifying parameters.
        context: String,
        /// The HTTP failure.
        source: HttpError,
    },

    /// The response did not have the expected shape.
    #[error("{context}: unexpected response shape: {source}")]
    Decode {
        /// The operation and its identifying parameters.
        context: String,
        /// The decoding failure.
        source: serde_json::Error,
    },

    /// The response contained neither `data` nor `errors`.
    #[error("{context}: response contained no data")]
    MissingData {
        /// The operation and its identifying parameters.
        context: String,
    },
}

impl MondayError {
    /// Wraps an executor error with operation context.
    pub fn from_graphql(context: impl Into<String>, error: GraphqlError) -> Self {
        let context = context.into();
        match error {
            GraphqlError::Http(source) => Self::Transport { context, source },
            GraphqlError::Remote(source) => Self::Remote { context, source },
            GraphqlError::Decode(source) => Self::Decode { context, source },
            GraphqlError::MissingData => Self::MissingData { context },
        }
    }

    /// Wraps an argument validation failure with operation context.
    pub fn invalid_argument(context: impl Into<String>, source: ArgumentError) -> Self {
        Self::InvalidArgument {
            context: context.into(),
            source,
        }
    }

    /// Returns the operation context, if this error carries one.
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::Configuration(_) => None,
            Self::InvalidArgument { context, .. }
            | Self::Remote { context, .. }
            | Self::Transport { context, .. }
            | Self::Decode { context, .. }
            | Self::MissingData { context } => Some(context),
        }
    }

    /// Returns `true` if the service reported GraphQL errors.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }

    /// Returns `true` for network failures and non-2xx statuses.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;

    #[test]
    fn test_remote_error_keeps_context_and_messages() {
        let error = MondayError::from_graphql(
            "get_items: items [1, 2]",
            GraphqlError::Remote(RemoteError::new(vec!["boom".to_string()])),
        );
        assert!(error.is_remote());
        assert_eq!(error.context(), Some("get_items: items [1, 2]"));
        assert_eq!(
            error.to_string(),
            "get_items: items [1, 2]: GraphQL errors: boom"
        );
    }

    #[test]
    fn test_transport_error_mentions_status_and_hint() {
        let http = HttpError::Response(HttpResponseError::new(
            401,
            "Not Authenticated".to_string(),
            None,
            None,
        ));
        let error = MondayError::from_graphql("get_current_user", GraphqlError::Http(http));
        assert!(error.is_transport());
        let message = error.to_string();
        assert!(message.starts_with("get_current_user: HTTP 401"));
    }

    #[test]
    fn test_configuration_error_has_no_context() {
        let error: MondayError = ConfigError::NoActiveProfile.into();
        assert!(error.context().is_none());
        assert!(!error.is_remote());
    }

    #[test]
    fn test_invalid_argument_display() {
        let error = MondayError::invalid_argument(
            "get_boards",
            ArgumentError::Empty { name: "board_name" },
        );
        assert_eq!(error.to_string(), "get_boards: board_name cannot be empty");
    }
}
