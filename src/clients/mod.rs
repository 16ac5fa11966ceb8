//! HTTP and GraphQL client types for Monday.com API communication.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client that posts GraphQL bodies
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`graphql::GraphqlClient`]: The request executor unwrapping `{data, errors}`
//! - [`graphql::GraphqlError`]: Executor error type
//!
//! # Retry Behavior
//!
//! None. Each call makes a single network attempt. 401 and 429 responses
//! are reported with an explanatory hint and returned to the caller.

mod errors;
pub mod graphql;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, AUTHENTICATION_HINT, RATE_LIMIT_HINT,
};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;

pub use graphql::{GraphqlClient, GraphqlError};
