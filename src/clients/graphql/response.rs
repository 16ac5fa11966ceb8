//! The GraphQL response envelope.

use serde::Deserialize;
use serde_json::Value;

use crate::clients::graphql::{GraphqlError, RemoteError};

/// One entry of a GraphQL `errors` array.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphqlErrorEntry {
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Service-specific extensions (Monday.com puts `code` here).
    #[serde(default)]
    pub extensions: Option<Value>,
}

impl GraphqlErrorEntry {
    /// Returns `extensions.code`, if present.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .and_then(Value::as_str)
    }
}

/// Decoded `{data, errors}` envelope.
///
/// Monday.com sometimes answers with a flat
/// `{"error_message", "error_code", "status_code"}` object instead of a
/// GraphQL `errors` array; both are captured.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct GraphqlResponse {
    /// The `data` object, if any.
    #[serde(default)]
    pub data: Option<Value>,
    /// GraphQL errors, if any.
    #[serde(default)]
    pub errors: Option<Vec<GraphqlErrorEntry>>,
    /// Top-level error message used by some Monday.com failures.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Top-level error code used by some Monday.com failures.
    #[serde(default)]
    pub error_code: Option<String>,
    /// The account the request was executed against.
    #[serde(default)]
    pub account_id: Option<u64>,
}

impl GraphqlResponse {
    /// Returns the remote error carried by this envelope, if any.
    ///
    /// A non-empty `errors` array takes priority over `error_message`.
    #[must_use]
    pub fn remote_error(&self) -> Option<RemoteError> {
        if let Some(errors) = self.errors.as_ref().filter(|errors| !errors.is_empty()) {
            return Some(RemoteError {
                messages: errors.iter().map(|e| e.message.clone()).collect(),
                codes: errors
                    .iter()
                    .filter_map(GraphqlErrorEntry::code)
                    .map(str::to_string)
                    .collect(),
            });
        }

        self.error_message.as_ref().map(|message| RemoteError {
            messages: vec![message.clone()],
            codes: self.error_code.iter().cloned().collect(),
        })
    }

    /// Unwraps the envelope into its `data` object.
    ///
    /// # Errors
    ///
    /// - [`GraphqlError::Remote`] if errors are present, regardless of `data`
    /// - [`GraphqlError::MissingData`] if `data` is absent or null
    pub fn into_data(self) -> Result<Value, GraphqlError> {
        if let Some(error) = self.remote_error() {
            return Err(GraphqlError::Remote(error));
        }

        match self.data {
            Some(Value::Null) | None => Err(GraphqlError::MissingData),
            Some(data) => Ok(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> GraphqlResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_data_only_unwraps() {
        let data = decode(json!({"data": {"me": {"id": "1"}}, "account_id": 42}))
            .into_data()
            .unwrap();
        assert_eq!(data["me"]["id"], "1");
    }

    #[test]
    fn test_errors_take_priority_over_data() {
        let response = decode(json!({
            "data": {"items": []},
            "errors": [
                {"message": "first", "extensions": {"code": "InvalidArgument"}},
                {"message": "second"}
            ]
        }));

        match response.into_data() {
            Err(GraphqlError::Remote(error)) => {
                assert_eq!(error.messages, vec!["first", "second"]);
                assert_eq!(error.codes, vec!["InvalidArgument"]);
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_errors_array_is_not_an_error() {
        let data = decode(json!({"data": {"ok": true}, "errors": []}))
            .into_data()
            .unwrap();
        assert_eq!(data["ok"], true);
    }

    #[test]
    fn test_top_level_error_message_is_remote_error() {
        let response = decode(json!({
            "error_message": "User unauthorized to perform action",
            "error_code": "UserUnauthorizedException",
            "status_code": 403
        }));

        let error = response.remote_error().unwrap();
        assert_eq!(error.messages, vec!["User unauthorized to perform action"]);
        assert_eq!(error.codes, vec!["UserUnauthorizedException"]);
    }

    #[test]
    fn test_null_data_is_missing() {
        let result = decode(json!({"data": null})).into_data();
        assert!(matches!(result, Err(GraphqlError::MissingData)));

        let result = decode(json!({})).into_data();
        assert!(matches!(result, Err(GraphqlError::MissingData)));
    }
}
