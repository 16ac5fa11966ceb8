//! Profile type for persisted Monday.com credentials.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{ApiToken, ApiUrl, ApiVersion, MondayConfig, ProfileName};

/// A named, persisted credential set.
///
/// A profile pairs an API token with the endpoint it is valid for. Profiles
/// are written by [`ProfileStore::save`](crate::auth::ProfileStore::save)
/// and brought into memory by
/// [`Session::activate`](crate::auth::Session::activate).
///
/// # Example
///
/// ```rust
/// use monday_api::{ApiToken, ApiUrl, Profile, ProfileName};
///
/// let profile = Profile::new(
///     ProfileName::new("work").unwrap(),
///     ApiToken::new("token").unwrap(),
///     ApiUrl::default(),
/// );
///
/// let config = profile.to_config(None);
/// assert_eq!(config.api_token().as_ref(), "token");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    /// The profile name.
    pub name: ProfileName,
    /// The GraphQL endpoint this profile talks to.
    pub api_url: ApiUrl,
    /// The API token.
    pub api_token: ApiToken,
    /// When the profile was first saved.
    pub created: DateTime<Utc>,
}

impl Profile {
    /// Creates a new profile stamped with the current time.
    #[must_use]
    pub fn new(name: ProfileName, api_token: ApiToken, api_url: ApiUrl) -> Self {
        Self {
            name,
            api_url,
            api_token,
            created: Utc::now(),
        }
    }

    /// Builds a client configuration from this profile.
    ///
    /// `api_version` overrides the default version when given.
    #[must_use]
    pub fn to_config(&self, api_version: Option<ApiVersion>) -> MondayConfig {
        MondayConfig::from_parts(
            self.api_token.clone(),
            self.api_url.clone(),
            api_version.unwrap_or_else(ApiVersion::latest),
        )
    }

    pub(crate) fn metadata(&self) -> ProfileMetadata {
        ProfileMetadata {
            name: self.name.clone(),
            created: self.created,
            base_url: self.api_url.clone(),
        }
    }
}

/// On-disk profile metadata; the token is stored separately.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ProfileMetadata {
    pub name: ProfileName,
    pub created: DateTime<Utc>,
    pub base_url: ApiUrl,
}

// Verify Profile is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Profile>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Profile {
        Profile::new(
            ProfileName::new("default").unwrap(),
            ApiToken::new("abc").unwrap(),
            ApiUrl::new("http://localhost:9000/v2").unwrap(),
        )
    }

    #[test]
    fn test_to_config_carries_token_and_url() {
        let profile = sample();
        let config = profile.to_config(None);

        assert_eq!(config.api_token().as_ref(), "abc");
        assert_eq!(config.api_url().as_ref(), "http://localhost:9000/v2");
        assert_eq!(config.api_version(), &ApiVersion::latest());
    }

    #[test]
    fn test_to_config_applies_version_override() {
        let config = sample().to_config(Some(ApiVersion::V2024_10));
        assert_eq!(config.api_version(), &ApiVersion::V2024_10);
    }

    #[test]
    fn test_metadata_serializes_expected_keys() {
        let json = serde_json::to_value(sample().metadata()).unwrap();

        assert_eq!(json["name"], "default");
        assert_eq!(json["base_url"], "http://localhost:9000/v2");
        assert!(json["created"].is_string());
        assert!(json.get("api_token").is_none());
    }
}
