//! HTTP response type for the Monday.com API client.

use std::collections::HashMap;

use serde_json::Value;

/// An HTTP response from the Monday.com API.
///
/// Header names are stored lowercased; a header may repeat.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: Value,
    /// Seconds to wait before retrying (from `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing the `Retry-After` header.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Value) -> Self {
        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.trim().parse::<f64>().ok());

        Self {
            code,
            headers,
            body,
            retry_request_after,
        }
    }

    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the request ID from the `X-Request-Id` header.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Extracts a human-readable error message from the body.
    ///
    /// Looks at GraphQL `errors[].message`, Monday's top-level
    /// `error_message`, and a plain `error` string, in that order. Falls
    /// back to `raw_body` for unparseable bodies, then to the status code.
    #[must_use]
    pub fn error_message(&self) -> String {
        let graphql_messages: Vec<&str> = self
            .body
            .get("errors")
            .and_then(Value::as_array)
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e.get("message").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default();
        if !graphql_messages.is_empty() {
            return graphql_messages.join("; ");
        }

        ["error_message", "error", "raw_body"]
            .iter()
            .find_map(|key| self.body.get(*key).and_then(Value::as_str))
            .map_or_else(|| format!("status {}", self.code), str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        for (k, v) in pairs {
            map.entry((*k).to_string()).or_default().push((*v).to_string());
        }
        map
    }

    #[test]
    fn test_is_ok_range() {
        assert!(HttpResponse::new(200, HashMap::new(), json!({})).is_ok());
        assert!(HttpResponse::new(299, HashMap::new(), json!({})).is_ok());
        assert!(!HttpResponse::new(401, HashMap::new(), json!({})).is_ok());
        assert!(!HttpResponse::new(500, HashMap::new(), json!({})).is_ok());
    }

    #[test]
    fn test_retry_after_parsed() {
        let response = HttpResponse::new(429, headers(&[("retry-after", "12")]), json!({}));
        assert_eq!(response.retry_request_after, Some(12.0));

        let response = HttpResponse::new(429, headers(&[("retry-after", "soon")]), json!({}));
        assert_eq!(response.retry_request_after, None);
    }

    #[test]
    fn test_request_id() {
        let response = HttpResponse::new(200, headers(&[("x-request-id", "req-1")]), json!({}));
        assert_eq!(response.request_id(), Some("req-1"));
    }

    #[test]
    fn test_error_message_prefers_graphql_errors() {
        let response = HttpResponse::new(
            400,
            HashMap::new(),
            json!({"errors": [{"message": "a"}, {"message": "b"}], "error_message": "c"}),
        );
        assert_eq!(response.error_message(), "a; b");
    }

    #[test]
    fn test_error_message_fallbacks() {
        let response =
            HttpResponse::new(429, HashMap::new(), json!({"error_message": "Complexity budget exhausted"}));
        assert_eq!(response.error_message(), "Complexity budget exhausted");

        let response = HttpResponse::new(502, HashMap::new(), json!({"raw_body": "Bad Gateway"}));
        assert_eq!(response.error_message(), "Bad Gateway");

        let response = HttpResponse::new(503, HashMap::new(), json!({}));
        assert_eq!(response.error_message(), "status 503");
    }
}
