//! Persistence for profiles.
//!
//! Profile metadata lives in its own directory under the store root; the
//! token is held by a [`CredentialStore`], never in the directory:
//!
//! ```text
//! <root>/<name>/profile.json   {"name", "created", "base_url"}
//! keyring: service "monday-api", user <name>   API token
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::auth::credentials::{CredentialStore, KeyringCredentials};
use crate::auth::profile::{Profile, ProfileMetadata};
use crate::config::{ApiToken, ApiUrl, ProfileName};
use crate::error::ConfigError;

const METADATA_FILE: &str = "profile.json";

/// Directory of persisted profiles plus the store holding their tokens.
///
/// # Example
///
/// ```rust,no_run
/// use monday_api::{ApiToken, ApiUrl, ProfileName, ProfileStore};
///
/// let store = ProfileStore::default_location().unwrap();
/// let name = ProfileName::new("work").unwrap();
/// store.save(&name, &ApiToken::new("token").unwrap(), &ApiUrl::default()).unwrap();
///
/// let profile = store.load(&name).unwrap();
/// assert_eq!(profile.name, name);
/// ```
#[derive(Clone, Debug)]
pub struct ProfileStore {
    root: PathBuf,
    credentials: Arc<dyn CredentialStore>,
}

impl ProfileStore {
    /// Creates a store rooted at `root` that keeps tokens in the operating
    /// system keyring. The directory is created lazily.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_credentials(root, KeyringCredentials::default())
    }

    /// Creates a store rooted at `root` with a custom token backend.
    #[must_use]
    pub fn with_credentials(
        root: impl Into<PathBuf>,
        credentials: impl CredentialStore + 'static,
    ) -> Self {
        Self {
            root: root.into(),
            credentials: Arc::new(credentials),
        }
    }

    /// Creates a keyring-backed store in the user's configuration directory
    /// (`<config dir>/monday-api/profiles`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConfigDirectory`] when the platform reports
    /// no configuration directory.
    pub fn default_location() -> Result<Self, ConfigError> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDirectory)?;
        Ok(Self::new(base.join("monday-api").join("profiles")))
    }

    /// Returns the store root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the token backend.
    #[must_use]
    pub fn credentials(&self) -> &dyn CredentialStore {
        self.credentials.as_ref()
    }

    fn profile_dir(&self, name: &ProfileName) -> PathBuf {
        self.root.join(name.as_ref())
    }

    /// Returns `true` if a profile with this name has been saved.
    #[must_use]
    pub fn exists(&self, name: &ProfileName) -> bool {
        self.profile_dir(name).join(METADATA_FILE).is_file()
    }

    /// Persists a profile, replacing any existing profile with the same name.
    ///
    /// When a profile is replaced its original creation time is kept. If
    /// the metadata of a new profile cannot be written, its token is
    /// removed again.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Credential`] if the token cannot be stored and
    /// [`ConfigError::Io`] if the metadata cannot be written.
    pub fn save(
        &self,
        name: &ProfileName,
        api_token: &ApiToken,
        api_url: &ApiUrl,
    ) -> Result<Profile, ConfigError> {
        let dir = self.profile_dir(name);

        let mut profile = Profile::new(name.clone(), api_token.clone(), api_url.clone());
        let existing = self.read_metadata(name).ok();
        if let Some(existing) = &existing {
            profile.created = existing.created;
        }
        let metadata = serde_json::to_vec_pretty(&profile.metadata()).map_err(|source| {
            ConfigError::Metadata {
                name: name.to_string(),
                source,
            }
        })?;

        self.credentials
            .set(name, api_token)
            .map_err(|source| ConfigError::Credential {
                name: name.to_string(),
                source,
            })?;

        let written =
            fs::create_dir_all(&dir).and_then(|()| fs::write(dir.join(METADATA_FILE), metadata));
        if let Err(source) = written {
            if existing.is_none() {
                if let Err(e) = self.credentials.delete(name) {
                    tracing::warn!("Could not remove token for unsaved profile '{}': {}", name, e);
                }
            }
            return Err(ConfigError::Io {
                name: name.to_string(),
                source,
            });
        }

        tracing::debug!("Saved profile '{}' to {}", name, dir.display());
        Ok(profile)
    }

    /// Loads a saved profile and its token.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ProfileNotFound`] if no metadata file exists
    /// - [`ConfigError::MissingCredential`] if no token is stored
    /// - [`ConfigError::EmptyApiToken`] if the stored token is empty
    /// - [`ConfigError::Credential`] if the token store cannot be read
    /// - [`ConfigError::Metadata`] / [`ConfigError::Io`] on unreadable files
    pub fn load(&self, name: &ProfileName) -> Result<Profile, ConfigError> {
        let metadata = self.read_metadata(name)?;

        let token = self
            .credentials
            .get(name)
            .map_err(|source| ConfigError::Credential {
                name: name.to_string(),
                source,
            })?
            .ok_or_else(|| ConfigError::MissingCredential {
                name: name.to_string(),
            })?;

        Ok(Profile {
            name: name.clone(),
            api_url: metadata.base_url,
            api_token: ApiToken::new(token)?,
            created: metadata.created,
        })
    }

    fn read_metadata(&self, name: &ProfileName) -> Result<ProfileMetadata, ConfigError> {
        let path = self.profile_dir(name).join(METADATA_FILE);
        let raw = match fs::read(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::ProfileNotFound {
                    name: name.to_string(),
                    dir: self.root.clone(),
                });
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    name: name.to_string(),
                    source,
                })
            }
        };

        serde_json::from_slice(&raw).map_err(|source| ConfigError::Metadata {
            name: name.to_string(),
            source,
        })
    }

    /// Lists saved profile names in sorted order.
    ///
    /// A missing store root yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the root cannot be read.
    pub fn list(&self) -> Result<Vec<ProfileName>, ConfigError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(ConfigError::Io {
                    name: self.root.display().to_string(),
                    source,
                })
            }
        };

        let mut names: Vec<ProfileName> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .filter_map(|name| ProfileName::new(name).ok())
            .filter(|name| self.exists(name))
            .collect();
        names.sort();
        Ok(names)
    }

    /// Deletes a saved profile and its token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ProfileNotFound`] if the profile does not exist,
    /// [`ConfigError::Credential`] if the token cannot be removed, or
    /// [`ConfigError::Io`] if the directory cannot be removed.
    pub fn remove(&self, name: &ProfileName) -> Result<(), ConfigError> {
        if !self.exists(name) {
            return Err(ConfigError::ProfileNotFound {
                name: name.to_string(),
                dir: self.root.clone(),
            });
        }
        self.credentials
            .delete(name)
            .map_err(|source| ConfigError::Credential {
                name: name.to_string(),
                source,
            })?;
        fs::remove_dir_all(self.profile_dir(name)).map_err(|source| ConfigError::Io {
            name: name.to_string(),
            source,
        })?;
        tracing::debug!("Removed profile '{}'", name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryCredentials;

    fn name(s: &str) -> ProfileName {
        ProfileName::new(s).unwrap()
    }

    fn memory_store(root: &Path) -> (ProfileStore, MemoryCredentials) {
        let credentials = MemoryCredentials::new();
        (
            ProfileStore::with_credentials(root, credentials.clone()),
            credentials,
        )
    }

    #[derive(Debug)]
    struct RejectingCredentials;

    impl CredentialStore for RejectingCredentials {
        fn get(&self, _: &ProfileName) -> keyring::Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _: &ProfileName, _: &ApiToken) -> keyring::Result<()> {
            Err(keyring::Error::Invalid(
                "password".to_string(),
                "rejected".to_string(),
            ))
        }

        fn delete(&self, _: &ProfileName) -> keyring::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_save_then_load_returns_same_profile() {
        let dir = tempfile::tempdir().unwrap();
        let (store, _) = memory_store(dir.path());
        let url = ApiUrl::new("https://api.monday.com/v2").unwrap();

        let saved = store
            .save(&name("work"), &ApiToken::new("tok-1").unwrap(), &url)
            .unwrap();
        let loaded = store.load(&name("work")).unwrap();

        assert_eq!(saved, loaded);
        assert_eq!(loaded.api_token.as_ref(), "tok-1");
    }

    #[test]
    fn test_profile_directory_never_contains_token() {
        let dir = tempfile::tempdir().unwrap();
        let (store, credentials) = memory_store(dir.path());
        store
            .save(
                &name("work"),
                &ApiToken::new("super-secret-token").unwrap(),
                &ApiUrl::default(),
            )
            .unwrap();

        let files: Vec<PathBuf> = fs::read_dir(dir.path().join("work"))
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(files, vec![dir.path().join("work").join(METADATA_FILE)]);
        for file in files {
            let contents = fs::read_to_string(file).unwrap();
            assert!(!contents.contains("super-secret-token"));
        }
        assert_eq!(
            credentials.get(&name("work")).unwrap().as_deref(),
            Some("super-secret-token")
        );
    }

    #[test]
    fn test_load_missing_profile_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let (store, _) = memory_store(dir.path());

        let result = store.load(&name("ghost"));
        assert!(matches!(result, Err(ConfigError::ProfileNotFound { ref name, .. }) if name == "ghost"));
    }

    #[test]
    fn test_load_without_stored_token_fails() {
        let dir = tempfile::tempdir().unwrap();
        let (store, credentials) = memory_store(dir.path());
        store
            .save(&name("work"), &ApiToken::new("t").unwrap(), &ApiUrl::default())
            .unwrap();
        credentials.delete(&name("work")).unwrap();

        let result = store.load(&name("work"));
        assert!(matches!(result, Err(ConfigError::MissingCredential { ref name }) if name == "work"));
    }

    #[test]
    fn test_failed_metadata_write_removes_new_token() {
        let dir = tempfile::tempdir().unwrap();
        let (store, credentials) = memory_store(dir.path());
        // A directory where the metadata file should go makes the write fail.
        fs::create_dir_all(dir.path().join("work").join(METADATA_FILE)).unwrap();

        let result = store.save(&name("work"), &ApiToken::new("t").unwrap(), &ApiUrl::default());

        assert!(matches!(result, Err(ConfigError::Io { .. })));
        assert!(credentials.is_empty());
    }

    #[test]
    fn test_rejected_token_writes_no_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::with_credentials(dir.path(), RejectingCredentials);

        let result = store.save(&name("work"), &ApiToken::new("t").unwrap(), &ApiUrl::default());

        assert!(matches!(result, Err(ConfigError::Credential { ref name, .. }) if name == "work"));
        assert!(!store.exists(&name("work")));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_resave_keeps_created_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let (store, _) = memory_store(dir.path());
        let first = store
            .save(&name("work"), &ApiToken::new("old").unwrap(), &ApiUrl::default())
            .unwrap();
        let second = store
            .save(&name("work"), &ApiToken::new("new").unwrap(), &ApiUrl::default())
            .unwrap();

        assert_eq!(first.created, second.created);
        assert_eq!(store.load(&name("work")).unwrap().api_token.as_ref(), "new");
    }

    #[test]
    fn test_list_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let (store, credentials) = memory_store(dir.path());
        assert!(store.list().unwrap().is_empty());

        for n in ["zeta", "alpha"] {
            store
                .save(&name(n), &ApiToken::new("t").unwrap(), &ApiUrl::default())
                .unwrap();
        }
        fs::create_dir_all(dir.path().join("not-a-profile")).unwrap();

        assert_eq!(store.list().unwrap(), vec![name("alpha"), name("zeta")]);

        store.remove(&name("alpha")).unwrap();
        assert_eq!(store.list().unwrap(), vec![name("zeta")]);
        assert_eq!(credentials.get(&name("alpha")).unwrap(), None);
        assert_eq!(credentials.len(), 1);
        assert!(matches!(
            store.remove(&name("alpha")),
            Err(ConfigError::ProfileNotFound { .. })
        ));
    }
}
