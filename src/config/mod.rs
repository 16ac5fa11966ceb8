//! Configuration types for the Monday.com API client.
//!
//! This module provides the configuration consumed by the request executor.
//! A configuration is either built directly or obtained from an activated
//! [`Profile`](crate::auth::Profile).
//!
//! # Overview
//!
//! - [`MondayConfig`]: The main configuration struct holding all client settings
//! - [`MondayConfigBuilder`]: A builder for constructing [`MondayConfig`] instances
//! - [`ApiToken`]: A validated API token with masked debug output
//! - [`ApiUrl`]: A validated GraphQL endpoint URL
//! - [`ProfileName`]: A validated profile name
//! - [`ApiVersion`]: The Monday.com API version to request
//!
//! # Example
//!
//! ```rust
//! use monday_api::{MondayConfig, ApiToken, ApiVersion};
//!
//! let config = MondayConfig::builder()
//!     .api_token(ApiToken::new("my-token").unwrap())
//!     .api_version(ApiVersion::V2025_04)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_url().as_ref(), "https://api.monday.com/v2");
//! ```

mod newtypes;
mod version;

pub use newtypes::{ApiToken, ApiUrl, ProfileName};
pub use version::ApiVersion;

use crate::error::ConfigError;

/// Configuration for the Monday.com API client.
///
/// # Thread Safety
///
/// `MondayConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct MondayConfig {
    api_token: ApiToken,
    api_url: ApiUrl,
    api_version: ApiVersion,
    user_agent_prefix: Option<String>,
}

impl MondayConfig {
    /// Creates a new builder for constructing a `MondayConfig`.
    #[must_use]
    pub fn builder() -> MondayConfigBuilder {
        MondayConfigBuilder::new()
    }

    pub(crate) const fn from_parts(
        api_token: ApiToken,
        api_url: ApiUrl,
        api_version: ApiVersion,
    ) -> Self {
        Self {
            api_token,
            api_url,
            api_version,
            user_agent_prefix: None,
        }
    }

    pub(crate) fn with_api_version(mut self, api_version: ApiVersion) -> Self {
        self.api_version = api_version;
        self
    }

    /// Returns the API token.
    #[must_use]
    pub const fn api_token(&self) -> &ApiToken {
        &self.api_token
    }

    /// Returns the GraphQL endpoint URL.
    #[must_use]
    pub const fn api_url(&self) -> &ApiUrl {
        &self.api_url
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify MondayConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MondayConfig>();
};

/// Builder for constructing [`MondayConfig`] instances.
///
/// The only required field is `api_token`.
///
/// # Defaults
///
/// - `api_url`: `https://api.monday.com/v2`
/// - `api_version`: [`ApiVersion::latest()`]
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct MondayConfigBuilder {
    api_token: Option<ApiToken>,
    api_url: Option<ApiUrl>,
    api_version: Option<ApiVersion>,
    user_agent_prefix: Option<String>,
}

impl MondayConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API token (required).
    #[must_use]
    pub fn api_token(mut self, token: ApiToken) -> Self {
        self.api_token = Some(token);
        self
    }

    /// Sets the GraphQL endpoint URL.
    #[must_use]
    pub fn api_url(mut self, url: ApiUrl) -> Self {
        self.api_url = Some(url);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`MondayConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_token` is not set.
    pub fn build(self) -> Result<MondayConfig, ConfigError> {
        let api_token = self
            .api_token
            .ok_or(ConfigError::MissingRequiredField { field: "api_token" })?;

        Ok(MondayConfig {
            api_token,
            api_url: self.api_url.unwrap_or_default(),
            api_version: self.api_version.unwrap_or_else(ApiVersion::latest),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
