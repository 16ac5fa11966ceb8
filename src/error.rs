//! Error types for the Monday.com API client.
//!
//! This module contains the configuration error type used when building
//! client configuration, validating newtypes, and loading or activating
//! persisted profiles.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use monday_api::{ApiToken, ConfigError};
//!
//! let result = ApiToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiToken)));
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while configuring the client or managing profiles.
///
/// Every variant that concerns a profile names it, so a failure can be
/// traced back to the profile the caller asked for.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// API token cannot be empty.
    #[error("API token cannot be empty. Please provide a valid Monday.com API token.")]
    EmptyApiToken,

    /// API URL is invalid.
    #[error("Invalid API URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.monday.com/v2').")]
    InvalidApiUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM' (e.g., '2024-10').")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Profile name is invalid.
    #[error("Invalid profile name '{name}'. Use letters, digits, '-', '_' or '.'.")]
    InvalidProfileName {
        /// The invalid name that was provided.
        name: String,
    },

    /// The requested profile does not exist.
    #[error("Profile '{name}' not found in {}. Create it before activating.", dir.display())]
    ProfileNotFound {
        /// The profile name that was requested.
        name: String,
        /// The directory that was searched.
        dir: PathBuf,
    },

    /// The profile exists but no token is stored for it.
    #[error("No API token stored for profile '{name}'. Save the profile again to restore it.")]
    MissingCredential {
        /// The profile name.
        name: String,
    },

    /// The credential store could not be read or written.
    #[error("Credential store failed for profile '{name}': {source}")]
    Credential {
        /// The profile name.
        name: String,
        /// The underlying keyring error.
        #[source]
        source: keyring::Error,
    },

    /// No profile has been activated in the session.
    #[error("No active profile. Activate a profile before issuing API calls.")]
    NoActiveProfile,

    /// No configuration directory could be determined for this user.
    #[error("Could not determine a configuration directory for profiles.")]
    NoConfigDirectory,

    /// Reading or writing profile files failed.
    #[error("Profile I/O failed for '{name}': {source}")]
    Io {
        /// The profile name.
        name: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The profile metadata file could not be decoded or encoded.
    #[error("Profile metadata for '{name}' is invalid: {source}")]
    Metadata {
        /// The profile name.
        name: String,
        /// The underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}
