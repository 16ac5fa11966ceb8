//! HTTP client for Monday.com API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! GraphQL POST requests. Each call makes exactly one network attempt.

use std::collections::HashMap;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::config::MondayConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Monday.com API.
///
/// The client handles:
/// - Default headers including `Authorization`, `API-Version` and User-Agent
/// - JSON body encoding and decoding
/// - Mapping non-2xx responses to [`HttpResponseError`] with hints
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Full endpoint URL (e.g., `https://api.monday.com/v2`).
    api_url: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    ///
    /// # Example
    ///
    /// ```rust
    /// use monday_api::{ApiToken, MondayConfig};
    /// use monday_api::clients::HttpClient;
    ///
    /// let config = MondayConfig::builder()
    ///     .api_token(ApiToken::new("token").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = HttpClient::new(&config);
    /// assert_eq!(client.api_url(), "https://api.monday.com/v2");
    /// ```
    #[must_use]
    pub fn new(config: &MondayConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Monday API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "Authorization".to_string(),
            config.api_token().as_ref().to_string(),
        );
        default_headers.insert(
            "API-Version".to_string(),
            config.api_version().to_string(),
        );

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_url: config.api_url().as_ref().to_string(),
            default_headers,
        }
    }

    /// Returns the endpoint URL for this client.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a GraphQL request to the Monday.com API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let mut headers = self.default_headers.clone();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut req_builder = self.client.post(&self.api_url);
        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        tracing::debug!("POST {}", self.api_url);
        let res = req_builder.body(request.body.to_string()).send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        let body = if body_text.is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(&body_text)
                .unwrap_or_else(|_| serde_json::json!({ "raw_body": body_text }))
        };

        let response = HttpResponse::new(code, res_headers, body);

        if response.is_ok() {
            return Ok(response);
        }

        let error = HttpResponseError::new(
            code,
            response.error_message(),
            response.request_id().map(String::from),
            response.retry_request_after,
        );
        tracing::warn!("Monday API request failed: {}", error);
        Err(HttpError::Response(error))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiToken, ApiVersion};

    fn create_test_config() -> MondayConfig {
        MondayConfig::builder()
            .api_token(ApiToken::new("test-token").unwrap())
            .api_version(ApiVersion::V2025_04)
            .build()
            .unwrap()
    }

    #[test]
    fn test_authorization_header_injection() {
        let client = HttpClient::new(&create_test_config());

        assert_eq!(
            client.default_headers().get("Authorization"),
            Some(&"test-token".to_string())
        );
    }

    #[test]
    fn test_api_version_header() {
        let client = HttpClient::new(&create_test_config());

        assert_eq!(
            client.default_headers().get("API-Version"),
            Some(&"2025-04".to_string())
        );
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&create_test_config());

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("Monday API Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = MondayConfig::builder()
            .api_token(ApiToken::new("t").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();
        let client = HttpClient::new(&config);

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
