//! Where profile tokens are kept.
//!
//! Tokens never touch the profile directory. [`KeyringCredentials`] hands
//! them to the platform credential store (Keychain, Windows Credential
//! Manager, the kernel keyring on Linux), which encrypts them for the
//! current user. [`MemoryCredentials`] keeps them in process memory.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::{ApiToken, ProfileName};

/// Keyring service name under which tokens are stored.
pub const KEYRING_SERVICE: &str = "monday-api";

/// Backend holding one API token per profile name.
pub trait CredentialStore: fmt::Debug + Send + Sync {
    /// Returns the token stored for `profile`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the store cannot be read.
    fn get(&self, profile: &ProfileName) -> keyring::Result<Option<String>>;

    /// Stores `token` for `profile`, replacing any previous token.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the store cannot be written.
    fn set(&self, profile: &ProfileName, token: &ApiToken) -> keyring::Result<()>;

    /// Removes the token for `profile`. Removing a missing token succeeds.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the store cannot be written.
    fn delete(&self, profile: &ProfileName) -> keyring::Result<()>;
}

/// Tokens in the operating system's credential store.
///
/// Each profile is one entry with service [`KEYRING_SERVICE`] and the
/// profile name as user.
#[derive(Clone, Debug)]
pub struct KeyringCredentials {
    service: String,
}

impl KeyringCredentials {
    /// Uses a custom keyring service name.
    #[must_use]
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, profile: &ProfileName) -> keyring::Result<keyring::Entry> {
        keyring::Entry::new(&self.service, profile.as_ref())
    }
}

impl Default for KeyringCredentials {
    fn default() -> Self {
        Self::with_service(KEYRING_SERVICE)
    }
}

impl CredentialStore for KeyringCredentials {
    fn get(&self, profile: &ProfileName) -> keyring::Result<Option<String>> {
        match self.entry(profile)?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&self, profile: &ProfileName, token: &ApiToken) -> keyring::Result<()> {
        self.entry(profile)?.set_password(token.as_ref())
    }

    fn delete(&self, profile: &ProfileName) -> keyring::Result<()> {
        match self.entry(profile)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Tokens held in process memory.
///
/// Clones share the same tokens. Nothing survives the process.
#[derive(Clone, Default)]
pub struct MemoryCredentials {
    tokens: Arc<Mutex<BTreeMap<ProfileName, String>>>,
}

impl MemoryCredentials {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if no token is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for MemoryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryCredentials")
            .field("len", &self.len())
            .finish()
    }
}

impl CredentialStore for MemoryCredentials {
    fn get(&self, profile: &ProfileName) -> keyring::Result<Option<String>> {
        let tokens = self.tokens.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(tokens.get(profile).cloned())
    }

    fn set(&self, profile: &ProfileName, token: &ApiToken) -> keyring::Result<()> {
        self.tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(profile.clone(), token.as_ref().to_string());
        Ok(())
    }

    fn delete(&self, profile: &ProfileName) -> keyring::Result<()> {
        self.tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(profile);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_credentials_are_shared_between_clones() {
        let store = MemoryCredentials::new();
        let other = store.clone();
        let name = ProfileName::new("work").unwrap();

        store.set(&name, &ApiToken::new("tok").unwrap()).unwrap();
        assert_eq!(other.get(&name).unwrap().as_deref(), Some("tok"));

        other.delete(&name).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.get(&name).unwrap(), None);
        other.delete(&name).unwrap();
    }

    #[test]
    fn test_memory_credentials_debug_hides_tokens() {
        let store = MemoryCredentials::new();
        store
            .set(&ProfileName::new("work").unwrap(), &ApiToken::new("secret").unwrap())
            .unwrap();
        let debug = format!("{store:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("len: 1"));
    }

    #[test]
    fn test_keyring_default_service() {
        let credentials = KeyringCredentials::default();
        assert_eq!(credentials.service, KEYRING_SERVICE);
    }
}
