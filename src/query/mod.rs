//! Building blocks for assembling GraphQL text.
//!
//! Query builders in [`crate::api`] use these helpers to validate inputs and
//! render arguments and field selections. Nothing here performs I/O.
//!
//! # Example
//!
//! ```rust
//! use monday_api::query::{Arguments, Selection};
//!
//! let args = Arguments::new()
//!     .ids("ids", &[1, 2])
//!     .raw("limit", 10)
//!     .string("name", "Road \"map\"");
//! let fields = Selection::new(["id", "name"]).with_if(true, "columns { id }");
//!
//! assert_eq!(
//!     format!("boards{} {}", args, fields),
//!     r#"boards(ids: [1, 2], limit: 10, name: "Road \"map\"") { id name columns { id } }"#,
//! );
//! ```

mod escape;

use std::fmt;

use thiserror::Error;

pub use escape::{escape_graphql_string, quote};

/// Input validation failures raised before any request is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// A numeric argument is outside its allowed range.
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// Argument name.
        name: &'static str,
        /// The rejected value.
        value: u64,
        /// Inclusive lower bound.
        min: u64,
        /// Inclusive upper bound.
        max: u64,
    },

    /// A required argument is empty.
    #[error("{name} cannot be empty")]
    Empty {
        /// Argument name.
        name: &'static str,
    },

    /// A value that must be embedded as a bare GraphQL name is not one.
    #[error("{name} '{value}' is not a valid GraphQL name")]
    InvalidName {
        /// Argument name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A date column value could not be parsed.
    #[error("invalid date '{value}', expected YYYY-MM-DD with optional HH:MM[:SS]")]
    InvalidDate {
        /// The rejected value.
        value: String,
    },

    /// A person column value contained a non-numeric id.
    #[error("invalid person id '{value}'")]
    InvalidPersonId {
        /// The rejected value.
        value: String,
    },

    /// A column id was not found on the board.
    #[error("column '{id}' does not exist on the board")]
    UnknownColumn {
        /// The unknown column id.
        id: String,
    },
}

/// Checks that `value` is within `min..=max`, returning it unchanged.
///
/// # Errors
///
/// Returns [`ArgumentError::OutOfRange`] otherwise.
pub const fn check_range(
    name: &'static str,
    value: u32,
    min: u32,
    max: u32,
) -> Result<u32, ArgumentError> {
    if value < min || value > max {
        return Err(ArgumentError::OutOfRange {
            name,
            value: value as u64,
            min: min as u64,
            max: max as u64,
        });
    }
    Ok(value)
}

/// Checks that `value` is a bare GraphQL name (`[_A-Za-z][_0-9A-Za-z]*`).
///
/// # Errors
///
/// Returns [`ArgumentError::InvalidName`] otherwise.
pub fn check_name<'a>(name: &'static str, value: &'a str) -> Result<&'a str, ArgumentError> {
    let mut chars = value.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric());
    if valid {
        Ok(value)
    } else {
        Err(ArgumentError::InvalidName {
            name,
            value: value.to_string(),
        })
    }
}

/// Monday.com's `State` enum, shared by boards, items and workspaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum State {
    /// Active objects only.
    #[default]
    Active,
    /// Archived objects only.
    Archived,
    /// Deleted objects only.
    Deleted,
    /// Every state.
    All,
}

impl State {
    /// Returns the GraphQL enum literal.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
            Self::Deleted => "deleted",
            Self::All => "all",
        }
    }

    /// Returns `true` if a record with `state` passes this filter.
    ///
    /// Records that report no state are treated as active.
    #[must_use]
    pub fn matches(&self, state: Option<&str>) -> bool {
        match self {
            Self::All => true,
            _ => state.unwrap_or("active").eq_ignore_ascii_case(self.as_str()),
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders a list of numeric ids as a GraphQL list literal.
#[must_use]
pub fn id_list(ids: &[u64]) -> String {
    let joined: Vec<String> = ids.iter().map(u64::to_string).collect();
    format!("[{}]", joined.join(", "))
}

/// An argument list such as `(ids: [1], limit: 25)`.
///
/// Renders as an empty string when no arguments were added.
#[derive(Clone, Debug, Default)]
pub struct Arguments {
    parts: Vec<String>,
}

impl Arguments {
    /// Creates an empty argument list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an argument rendered verbatim (numbers, booleans, enum literals).
    #[must_use]
    pub fn raw(mut self, name: &str, value: impl fmt::Display) -> Self {
        self.parts.push(format!("{name}: {value}"));
        self
    }

    /// Adds an argument rendered verbatim when `value` is `Some`.
    #[must_use]
    pub fn raw_opt(self, name: &str, value: Option<impl fmt::Display>) -> Self {
        match value {
            Some(value) => self.raw(name, value),
            None => self,
        }
    }

    /// Adds an escaped, quoted string argument.
    #[must_use]
    pub fn string(self, name: &str, value: &str) -> Self {
        self.raw(name, quote(value))
    }

    /// Adds an escaped, quoted string argument when `value` is `Some`.
    #[must_use]
    pub fn string_opt(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.string(name, value),
            None => self,
        }
    }

    /// Adds a numeric id list; skipped when `ids` is empty.
    #[must_use]
    pub fn ids(self, name: &str, ids: &[u64]) -> Self {
        if ids.is_empty() {
            return self;
        }
        self.raw(name, id_list(ids))
    }

    /// Adds a list of escaped strings; skipped when `values` is empty.
    #[must_use]
    pub fn strings(self, name: &str, values: &[String]) -> Self {
        if values.is_empty() {
            return self;
        }
        let quoted: Vec<String> = values.iter().map(|v| quote(v)).collect();
        self.raw(name, format!("[{}]", quoted.join(", ")))
    }

    /// Returns `true` if no argument was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.parts.is_empty() {
            return Ok(());
        }
        write!(f, "({})", self.parts.join(", "))
    }
}

/// A field selection set such as `{ id name }`.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    fields: Vec<String>,
}

impl Selection {
    /// Creates a selection from base fields.
    #[must_use]
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Appends a field (or nested selection) unconditionally.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Appends a field (or nested selection) when `include` is set.
    #[must_use]
    pub fn with_if(self, include: bool, field: impl Into<String>) -> Self {
        if include {
            self.with(field)
        } else {
            self
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ {} }}", self.fields.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_range_returns_value_unmodified() {
        for value in [1, 2, 99, 250, 500] {
            assert_eq!(check_range("limit", value, 1, 500).unwrap(), value);
        }
    }

    #[test]
    fn test_check_range_rejects_out_of_bounds() {
        let error = check_range("limit", 0, 1, 500).unwrap_err();
        assert_eq!(
            error,
            ArgumentError::OutOfRange {
                name: "limit",
                value: 0,
                min: 1,
                max: 500
            }
        );
        assert!(check_range("limit", 501, 1, 500).is_err());
        assert_eq!(
            check_range("limit", 501, 1, 500).unwrap_err().to_string(),
            "limit must be between 1 and 500, got 501"
        );
    }

    #[test]
    fn test_check_name() {
        assert!(check_name("column_type", "status").is_ok());
        assert!(check_name("column_type", "_x9").is_ok());
        assert!(check_name("column_type", "9x").is_err());
        assert!(check_name("column_type", "a b").is_err());
        assert!(check_name("column_type", "").is_err());
        assert!(check_name("column_type", "a){").is_err());
    }

    #[test]
    fn test_state_matching() {
        assert!(State::All.matches(Some("deleted")));
        assert!(State::All.matches(None));
        assert!(State::Active.matches(None));
        assert!(State::Active.matches(Some("active")));
        assert!(!State::Active.matches(Some("archived")));
        assert!(State::Archived.matches(Some("ARCHIVED")));
        assert!(!State::Deleted.matches(None));
    }

    #[test]
    fn test_empty_arguments_render_nothing() {
        let args = Arguments::new().ids("ids", &[]).strings("emails", &[]);
        assert!(args.is_empty());
        assert_eq!(args.to_string(), "");
    }

    #[test]
    fn test_arguments_render_in_insertion_order() {
        let args = Arguments::new()
            .raw("limit", 5)
            .raw_opt("page", Some(2))
            .raw_opt("missing", None::<u32>)
            .string_opt("name", Some("a\tb"))
            .strings("emails", &["x@y.z".to_string()]);
        assert_eq!(
            args.to_string(),
            r#"(limit: 5, page: 2, name: "a\tb", emails: ["x@y.z"])"#
        );
    }

    #[test]
    fn test_selection_conditionally_includes_fields() {
        let selection = Selection::new(["id"])
            .with_if(false, "columns { id }")
            .with_if(true, "groups { id }");
        assert_eq!(selection.to_string(), "{ id groups { id } }");
    }

    #[test]
    fn test_id_list() {
        assert_eq!(id_list(&[111, 222]), "[111, 222]");
        assert_eq!(id_list(&[]), "[]");
    }
}
