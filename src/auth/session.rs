//! Explicit session holding the active profile.
//!
//! A [`Session`] replaces process-wide connection state: callers own one,
//! activate a profile on it, and ask it for clients.

use crate::api::MondayClient;
use crate::auth::{Profile, ProfileStore};
use crate::config::{ApiToken, ApiUrl, ApiVersion, MondayConfig, ProfileName};
use crate::error::ConfigError;

/// The active profile plus the store it was loaded from.
///
/// # Example
///
/// ```rust,no_run
/// use monday_api::{ProfileStore, Session};
///
/// let mut session = Session::new(ProfileStore::default_location().unwrap());
/// session.activate("work").unwrap();
///
/// let client = session.client().unwrap();
/// ```
#[derive(Debug)]
pub struct Session {
    store: ProfileStore,
    active: Option<Profile>,
    api_version: Option<ApiVersion>,
}

impl Session {
    /// Creates a session with no active profile.
    #[must_use]
    pub const fn new(store: ProfileStore) -> Self {
        Self {
            store,
            active: None,
            api_version: None,
        }
    }

    /// Pins the API version used for clients created by this session.
    #[must_use]
    pub fn with_api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Returns the profile store backing this session.
    #[must_use]
    pub const fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Returns the active profile, if any.
    #[must_use]
    pub const fn active(&self) -> Option<&Profile> {
        self.active.as_ref()
    }

    /// Loads the named profile and makes it active.
    ///
    /// On failure the previously active profile stays active.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the name is invalid or the profile cannot
    /// be loaded (see [`ProfileStore::load`]).
    pub fn activate(&mut self, name: &str) -> Result<&Profile, ConfigError> {
        let name = ProfileName::new(name)?;
        let profile = self.store.load(&name)?;

        if let Some(previous) = &self.active {
            tracing::debug!("Switching active profile from '{}' to '{}'", previous.name, name);
        } else {
            tracing::debug!("Activating profile '{}'", name);
        }

        Ok(&*self.active.insert(profile))
    }

    /// Saves a new profile and, when `activate` is set, makes it active.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the name is invalid or the profile cannot
    /// be written.
    pub fn create_profile(
        &mut self,
        name: &str,
        api_token: &ApiToken,
        api_url: &ApiUrl,
        activate: bool,
    ) -> Result<Profile, ConfigError> {
        let name = ProfileName::new(name)?;
        let profile = self.store.save(&name, api_token, api_url)?;
        if activate {
            self.active = Some(profile.clone());
        }
        Ok(profile)
    }

    /// Clears the active profile, returning it.
    pub fn deactivate(&mut self) -> Option<Profile> {
        self.active.take()
    }

    /// Returns the configuration for the active profile.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoActiveProfile`] if nothing is active.
    pub fn config(&self) -> Result<MondayConfig, ConfigError> {
        self.active
            .as_ref()
            .map(|profile| profile.to_config(self.api_version.clone()))
            .ok_or(ConfigError::NoActiveProfile)
    }

    /// Creates an API client for the active profile.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoActiveProfile`] if nothing is active.
    pub fn client(&self) -> Result<MondayClient, ConfigError> {
        self.config().map(|config| MondayClient::new(&config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryCredentials;

    fn store_with(names: &[&str]) -> (tempfile::TempDir, ProfileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::with_credentials(dir.path(), MemoryCredentials::new());
        for name in names {
            store
                .save(
                    &ProfileName::new(*name).unwrap(),
                    &ApiToken::new(format!("token-{name}")).unwrap(),
                    &ApiUrl::default(),
                )
                .unwrap();
        }
        (dir, store)
    }

    #[test]
    fn test_new_session_has_no_active_profile() {
        let (_dir, store) = store_with(&[]);
        let session = Session::new(store);

        assert!(session.active().is_none());
        assert!(matches!(session.config(), Err(ConfigError::NoActiveProfile)));
        assert!(matches!(session.client(), Err(ConfigError::NoActiveProfile)));
    }

    #[test]
    fn test_activate_loads_profile() {
        let (_dir, store) = store_with(&["work"]);
        let mut session = Session::new(store);

        let profile = session.activate("work").unwrap();
        assert_eq!(profile.api_token.as_ref(), "token-work");
        assert_eq!(
            session.config().unwrap().api_token().as_ref(),
            "token-work"
        );
    }

    #[test]
    fn test_failed_activation_keeps_current_profile() {
        let (_dir, store) = store_with(&["work"]);
        let mut session = Session::new(store);
        session.activate("work").unwrap();

        let result = session.activate("missing");
        assert!(matches!(result, Err(ConfigError::ProfileNotFound { .. })));
        assert_eq!(session.active().unwrap().name.as_ref(), "work");

        let result = session.activate("../escape");
        assert!(matches!(result, Err(ConfigError::InvalidProfileName { .. })));
        assert_eq!(session.active().unwrap().name.as_ref(), "work");
    }

    #[test]
    fn test_activate_replaces_profile() {
        let (_dir, store) = store_with(&["work", "personal"]);
        let mut session = Session::new(store);
        session.activate("work").unwrap();
        session.activate("personal").unwrap();

        assert_eq!(session.active().unwrap().name.as_ref(), "personal");
    }

    #[test]
    fn test_create_profile_optionally_activates() {
        let (_dir, store) = store_with(&[]);
        let mut session = Session::new(store);
        let token = ApiToken::new("t").unwrap();

        session
            .create_profile("staging", &token, &ApiUrl::default(), false)
            .unwrap();
        assert!(session.active().is_none());
        assert!(session
            .store()
            .exists(&ProfileName::new("staging").unwrap()));

        session
            .create_profile("prod", &token, &ApiUrl::default(), true)
            .unwrap();
        assert_eq!(session.active().unwrap().name.as_ref(), "prod");
    }

    #[test]
    fn test_session_api_version_applies_to_config() {
        let (_dir, store) = store_with(&["work"]);
        let mut session = Session::new(store).with_api_version(ApiVersion::V2025_01);
        session.activate("work").unwrap();

        assert_eq!(session.config().unwrap().api_version(), &ApiVersion::V2025_01);
    }

    #[test]
    fn test_deactivate_clears_profile() {
        let (_dir, store) = store_with(&["work"]);
        let mut session = Session::new(store);
        session.activate("work").unwrap();

        assert!(session.deactivate().is_some());
        assert!(session.active().is_none());
    }
}
