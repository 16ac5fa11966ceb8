//! GraphQL request executor for the Monday.com API.
//!
//! This module provides the [`GraphqlClient`] type, which sends a query with
//! optional variables and unwraps the response envelope.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::graphql::{GraphqlError, GraphqlResponse};
use crate::clients::{HttpClient, HttpRequest};
use crate::config::{ApiVersion, MondayConfig};

/// GraphQL request executor.
///
/// One call issues one HTTP POST with body `{"query", "variables"}`; there
/// is no retry.
///
/// # Thread Safety
///
/// `GraphqlClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use monday_api::{ApiToken, MondayConfig};
/// use monday_api::clients::GraphqlClient;
/// use serde_json::json;
///
/// let config = MondayConfig::builder()
///     .api_token(ApiToken::new("token").unwrap())
///     .build()
///     .unwrap();
/// let client = GraphqlClient::new(&config);
///
/// let data = client.query("query { me { id name } }", None).await?;
/// println!("Me: {}", data["me"]["name"]);
///
/// let data = client
///     .query(
///         "query ($ids: [ID!]) { boards(ids: $ids) { name } }",
///         Some(json!({ "ids": ["123"] })),
///     )
///     .await?;
/// ```
#[derive(Debug)]
pub struct GraphqlClient {
    http_client: HttpClient,
    api_version: ApiVersion,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient {
    /// Creates a new executor for the given configuration.
    #[must_use]
    pub fn new(config: &MondayConfig) -> Self {
        Self {
            http_client: HttpClient::new(config),
            api_version: config.api_version().clone(),
        }
    }

    /// Creates a new executor with a specific API version override.
    #[must_use]
    pub fn with_version(config: &MondayConfig, version: ApiVersion) -> Self {
        let config_version = config.api_version();
        if &version == config_version {
            tracing::debug!(
                "GraphQL client has a redundant API version override to the default {}",
                config_version
            );
        } else {
            tracing::debug!(
                "GraphQL client overriding default API version {} with {}",
                config_version,
                version
            );
        }

        let overridden = config.clone().with_api_version(version);
        Self::new(&overridden)
    }

    /// Returns the API version being used by this client.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Executes a query and returns the full decoded envelope.
    ///
    /// Remote errors are left in the envelope; only transport and decode
    /// failures are returned as `Err`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Http`] or [`GraphqlError::Decode`].
    pub async fn query_raw(
        &self,
        query: &str,
        variables: Option<Value>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<GraphqlResponse, GraphqlError> {
        let body = serde_json::json!({
            "query": query,
            "variables": variables.unwrap_or_else(|| Value::Object(serde_json::Map::new())),
        });

        let mut builder = HttpRequest::builder(body);
        if let Some(extra_headers) = headers {
            builder = builder.extra_headers(extra_headers);
        }
        let request = builder.build().map_err(|e| GraphqlError::Http(e.into()))?;

        tracing::debug!("Executing GraphQL operation ({} bytes)", query.len());
        let response = self.http_client.request(request).await?;
        Ok(serde_json::from_value(response.body)?)
    }

    /// Executes a query and returns its `data` object.
    ///
    /// # Errors
    ///
    /// - [`GraphqlError::Http`] for network failures and non-2xx statuses
    /// - [`GraphqlError::Remote`] when the response has a non-empty `errors`
    ///   array, even if `data` is present
    /// - [`GraphqlError::MissingData`] when there is no `data`
    pub async fn query(
        &self,
        query: &str,
        variables: Option<Value>,
    ) -> Result<Value, GraphqlError> {
        let envelope = self.query_raw(query, variables, None).await?;
        if let Some(error) = envelope.remote_error() {
            tracing::warn!("Monday API returned GraphQL errors: {}", error);
        }
        envelope.into_data()
    }

    /// Executes a query and decodes its `data` object into `T`.
    ///
    /// # Errors
    ///
    /// As [`query`](Self::query), plus [`GraphqlError::Decode`] if `data`
    /// does not match `T`.
    pub async fn query_as<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<Value>,
    ) -> Result<T, GraphqlError> {
        let data = self.query(query, variables).await?;
        Ok(serde_json::from_value(data)?)
    }
}
