//! GraphQL request executor for the Monday.com API.
//!
//! This module provides the executor built on top of the
//! [`HttpClient`](crate::clients::HttpClient): it serializes
//! `{query, variables}`, posts it, and unwraps the `{data, errors}` envelope.
//!
//! # Overview
//!
//! - [`GraphqlClient`]: The executor with `query`, `query_as` and `query_raw`
//! - [`GraphqlResponse`]: The decoded response envelope
//! - [`GraphqlError`]: Error type for executor operations
//! - [`RemoteError`]: GraphQL-level errors reported by the service
//!
//! # Error Priority
//!
//! A response with a non-empty `errors` array always fails with
//! [`GraphqlError::Remote`], even when `data` is also present.

mod client;
mod errors;
mod response;

pub use client::GraphqlClient;
pub use errors::{GraphqlError, RemoteError};
pub use response::{GraphqlErrorEntry, GraphqlResponse};
