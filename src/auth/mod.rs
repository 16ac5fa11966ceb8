//! Profiles and sessions for Monday.com API authentication.
//!
//! # Overview
//!
//! - [`Profile`]: A named `{token, base URL}` credential set
//! - [`ProfileStore`]: Directory of persisted profiles
//! - [`CredentialStore`]: Where profile tokens are kept, the OS keyring by
//!   default ([`KeyringCredentials`]) or memory ([`MemoryCredentials`])
//! - [`Session`]: Holds the active profile and hands out clients
//!
//! # Example
//!
//! ```rust,no_run
//! use monday_api::{ApiToken, ApiUrl, ProfileStore, Session};
//!
//! let mut session = Session::new(ProfileStore::default_location().unwrap());
//! session
//!     .create_profile("work", &ApiToken::new("token").unwrap(), &ApiUrl::default(), true)
//!     .unwrap();
//!
//! let client = session.client().unwrap();
//! ```

mod credentials;
mod profile;
mod session;
mod store;

pub use credentials::{CredentialStore, KeyringCredentials, MemoryCredentials, KEYRING_SERVICE};
pub use profile::Profile;
pub use session::Session;
pub use store::ProfileStore;
