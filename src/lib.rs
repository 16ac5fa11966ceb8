//! # Monday.com API Rust Client
//!
//! A thin, typed client for the Monday.com GraphQL API.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`MondayConfig`] and [`MondayConfigBuilder`]
//! - Validated newtypes for the API token, endpoint URL and profile names
//! - Named credential profiles persisted by [`ProfileStore`] and activated
//!   into a [`Session`]
//! - A GraphQL request executor that unwraps the `{data, errors}` envelope
//! - Pure query builders for boards, columns, groups, items, users, updates
//!   and workspaces, plus [`MondayClient`] methods that run them
//! - Cursor pagination for board items via [`pagination::Pager`]
//!
//! ## Quick Start
//!
//! ```rust
//! use monday_api::{ApiToken, ApiVersion, MondayConfig};
//!
//! let config = MondayConfig::builder()
//!     .api_token(ApiToken::new("your-api-token").unwrap())
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Profiles
//!
//! Each profile keeps its base URL in a small metadata file and its token in
//! the operating system keyring; both are loaded when the profile is
//! activated. Activating a profile that does not exist leaves the current
//! one in place.
//!
//! ```rust,no_run
//! use monday_api::{ApiToken, ApiUrl, ProfileName, ProfileStore, Session};
//!
//! let store = ProfileStore::default_location().unwrap();
//! store
//!     .save(
//!         &ProfileName::new("work").unwrap(),
//!         &ApiToken::new("your-api-token").unwrap(),
//!         &ApiUrl::default(),
//!     )
//!     .unwrap();
//!
//! let mut session = Session::new(store);
//! session.activate("work").unwrap();
//! let client = session.client().unwrap();
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use monday_api::api::{ItemQuery, NewItem, ColumnValue, ColumnValues};
//!
//! let items = client
//!     .get_board_items(1234, &ItemQuery { fetch_all: true, ..Default::default() })
//!     .await?;
//!
//! let mut item = NewItem::new(1234, "Write release notes");
//! item.column_values = ColumnValues::new().with("status", ColumnValue::status("Working on it"));
//! client.create_item(&item, false).await?;
//!
//! // Arbitrary GraphQL is available too
//! let data = client.execute("query { me { id name } }", None).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: the active profile lives in an explicit [`Session`]
//! - **Fail-fast validation**: newtypes and query arguments are validated
//!   before any request is sent
//! - **One request at a time**: no retries, caching or concurrent requests;
//!   pagination awaits each page before asking for the next
//! - **Not found is empty**: lookups that match nothing return an empty
//!   result and log a warning

pub mod api;
pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod pagination;
pub mod query;

// Re-export public types at crate root for convenience
pub use auth::{Profile, ProfileStore, Session};
pub use config::{ApiToken, ApiUrl, ApiVersion, MondayConfig, MondayConfigBuilder, ProfileName};
pub use error::ConfigError;

// Re-export the operations façade
pub use api::{ColumnType, ColumnValue, ColumnValues, MondayClient, MondayError, MutationResult};

// Re-export HTTP and GraphQL client types
pub use clients::{
    GraphqlClient, GraphqlError, HttpClient, HttpError, HttpRequest, HttpRequestBuilder,
    HttpResponse, HttpResponseError, InvalidHttpRequestError,
};
pub use query::ArgumentError;
