//! Escaping for GraphQL string literals.

use std::borrow::Cow;

/// Escapes `input` for embedding between double quotes in GraphQL text.
///
/// Backslash, double quote, newline, carriage return and tab are escaped.
/// Input without any of those characters is returned borrowed and unchanged.
///
/// # Example
///
/// ```rust
/// use monday_api::query::escape_graphql_string;
///
/// assert_eq!(escape_graphql_string(r#"say "hi""#), r#"say \"hi\""#);
/// assert_eq!(escape_graphql_string("plain"), "plain");
/// ```
#[must_use]
pub fn escape_graphql_string(input: &str) -> Cow<'_, str> {
    if !input.contains(['\\', '"', '\n', '\r', '\t']) {
        return Cow::Borrowed(input);
    }

    let mut escaped = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Escapes `input` and wraps it in double quotes.
#[must_use]
pub fn quote(input: &str) -> String {
    format!("\"{}\"", escape_graphql_string(input))
}
