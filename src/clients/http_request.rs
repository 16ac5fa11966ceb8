//! HTTP request type for GraphQL calls.
//!
//! Every Monday.com call is a JSON `POST` to a single endpoint, so a request
//! is just a body plus optional extra headers.

use std::collections::HashMap;

use serde_json::Value;

use crate::clients::errors::InvalidHttpRequestError;

/// A GraphQL POST request.
///
/// # Example
///
/// ```rust
/// use monday_api::clients::HttpRequest;
/// use serde_json::json;
///
/// let request = HttpRequest::builder(json!({"query": "query { me { id } }"}))
///     .header("X-Trace", "abc")
///     .build()
///     .unwrap();
/// assert_eq!(request.body["query"], "query { me { id } }");
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The JSON body (`{"query": ..., "variables": ...}`).
    pub body: Value,
    /// Additional headers to include in the request.
    pub extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequest {
    /// Creates a new builder for a request with the given body.
    #[must_use]
    pub fn builder(body: impl Into<Value>) -> HttpRequestBuilder {
        HttpRequestBuilder {
            body: body.into(),
            extra_headers: None,
        }
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the body is not an object or
    /// has no non-empty `query` string.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        let body = self
            .body
            .as_object()
            .ok_or(InvalidHttpRequestError::BodyNotObject)?;

        match body.get("query").and_then(Value::as_str) {
            Some(query) if !query.trim().is_empty() => Ok(()),
            _ => Err(InvalidHttpRequestError::MissingQuery),
        }
    }
}

/// Builder for [`HttpRequest`].
#[derive(Debug)]
pub struct HttpRequestBuilder {
    body: Value,
    extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequestBuilder {
    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets all extra headers at once.
    #[must_use]
    pub fn extra_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.extra_headers = Some(headers);
        self
    }

    /// Builds and validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if validation fails.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            body: self.body,
            extra_headers: self.extra_headers,
        };
        request.verify()?;
        Ok(request)
    }
}
