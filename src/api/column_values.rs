//! Typed column values for item mutations.
//!
//! A [`ColumnValue`] is chosen explicitly by the caller, or inferred from a
//! column's declared [`ColumnType`] with [`ColumnValue::infer`]. Values are
//! serialized into the JSON shapes `change_multiple_column_values` and
//! `create_item` accept.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use monday_api::api::{ColumnValue, ColumnValues};
//!
//! let values = ColumnValues::new()
//!     .with("status", ColumnValue::status("Done"))
//!     .with("owner", ColumnValue::Person(vec![42]))
//!     .with("due", ColumnValue::date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()));
//!
//! assert_eq!(
//!     values.to_json_string(),
//!     r#"{"due":{"date":"2024-05-01"},"owner":{"personsAndTeams":[{"id":42,"kind":"person"}]},"status":{"label":"Done"}}"#,
//! );
//! ```

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde_json::{json, Map, Value};

use super::{Column, ColumnType};
use crate::query::ArgumentError;

/// A value for one column.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnValue {
    /// Plain text, also used for numbers, emails, phones and links.
    Text(String),
    /// A status label.
    Status(String),
    /// A date with optional time of day.
    Date {
        /// Calendar date.
        date: NaiveDate,
        /// Time of day, if any.
        time: Option<NaiveTime>,
    },
    /// People column assignees, by user id.
    Person(Vec<u64>),
    /// Any JSON accepted by the column.
    Raw(Value),
}

impl ColumnValue {
    /// Creates a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Creates a status value.
    pub fn status(label: impl Into<String>) -> Self {
        Self::Status(label.into())
    }

    /// Creates a date value without a time.
    #[must_use]
    pub const fn date(date: NaiveDate) -> Self {
        Self::Date { date, time: None }
    }

    /// Infers a value from raw text using the column's declared type.
    ///
    /// - status: the trimmed label
    /// - date: `YYYY-MM-DD`, optionally followed by ` HH:MM` or ` HH:MM:SS`
    /// - people: comma separated user ids
    /// - checkbox: `true`/`yes`/`1`/`x` checks, anything else clears
    /// - text, long text, numbers, email, phone, link: the raw text
    /// - anything else: parsed JSON, or a JSON string if it does not parse
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::InvalidDate`] or
    /// [`ArgumentError::InvalidPersonId`] for malformed input.
    pub fn infer(column_type: &ColumnType, raw: &str) -> Result<Self, ArgumentError> {
        match column_type {
            ColumnType::Status => Ok(Self::Status(raw.trim().to_string())),
            ColumnType::Date => parse_date(raw),
            ColumnType::People => parse_people(raw).map(Self::Person),
            ColumnType::Checkbox => Ok(Self::Raw(if is_checked(raw) {
                json!({ "checked": "true" })
            } else {
                Value::Null
            })),
            ColumnType::Text
            | ColumnType::LongText
            | ColumnType::Numbers
            | ColumnType::Email
            | ColumnType::Phone
            | ColumnType::Link => Ok(Self::Text(raw.to_string())),
            _ => Ok(Self::Raw(
                serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())),
            )),
        }
    }

    /// Returns the JSON shape Monday.com expects for this value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(text) => Value::String(text.clone()),
            Self::Status(label) => json!({ "label": label }),
            Self::Date { date, time } => {
                let mut object = Map::new();
                object.insert(
                    "date".to_string(),
                    Value::String(date.format("%Y-%m-%d").to_string()),
                );
                if let Some(time) = time {
                    object.insert(
                        "time".to_string(),
                        Value::String(time.format("%H:%M:%S").to_string()),
                    );
                }
                Value::Object(object)
            }
            Self::Person(ids) => {
                let people: Vec<Value> = ids
                    .iter()
                    .map(|id| json!({ "id": id, "kind": "person" }))
                    .collect();
                json!({ "personsAndTeams": people })
            }
            Self::Raw(value) => value.clone(),
        }
    }
}

impl From<NaiveDate> for ColumnValue {
    fn from(date: NaiveDate) -> Self {
        Self::date(date)
    }
}

impl From<Value> for ColumnValue {
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

fn parse_date(raw: &str) -> Result<ColumnValue, ArgumentError> {
    let invalid = || ArgumentError::InvalidDate {
        value: raw.to_string(),
    };
    let trimmed = raw.trim();
    let (date_part, time_part) = match trimmed.split_once([' ', 'T']) {
        Some((date, time)) => (date, Some(time.trim())),
        None => (trimmed, None),
    };

    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| invalid())?;
    let time = time_part
        .map(|time| {
            NaiveTime::parse_from_str(time, "%H:%M:%S")
                .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
                .map_err(|_| invalid())
        })
        .transpose()?;
    Ok(ColumnValue::Date { date, time })
}

fn parse_people(raw: &str) -> Result<Vec<u64>, ArgumentError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse().map_err(|_| ArgumentError::InvalidPersonId {
                value: part.to_string(),
            })
        })
        .collect()
}

fn is_checked(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "1" | "x" | "checked"
    )
}

/// Column values keyed by column id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnValues(BTreeMap<String, ColumnValue>);

impl ColumnValues {
    /// Creates an empty set of values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, column_id: impl Into<String>, value: impl Into<ColumnValue>) -> Self {
        self.insert(column_id, value);
        self
    }

    /// Inserts a value, replacing any previous value for the column.
    pub fn insert(&mut self, column_id: impl Into<String>, value: impl Into<ColumnValue>) {
        self.0.insert(column_id.into(), value.into());
    }

    /// Returns the value for a column.
    #[must_use]
    pub fn get(&self, column_id: &str) -> Option<&ColumnValue> {
        self.0.get(column_id)
    }

    /// Returns `true` if no value was set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over values in column id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnValue)> {
        self.0.iter().map(|(id, value)| (id.as_str(), value))
    }

    /// Returns the values as one JSON object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(id, value)| (id.clone(), value.to_json()))
                .collect(),
        )
    }

    /// Returns the compact JSON text embedded in mutations.
    #[must_use]
    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }

    /// Infers typed values from raw text using the board's declared columns.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::UnknownColumn`] for ids not in `columns`, or
    /// any error from [`ColumnValue::infer`].
    pub fn infer(
        columns: &[Column],
        raw: &BTreeMap<String, String>,
    ) -> Result<Self, ArgumentError> {
        let mut values = Self::new();
        for (id, text) in raw {
            let column = columns
                .iter()
                .find(|column| &column.id == id)
                .ok_or_else(|| ArgumentError::UnknownColumn { id: id.clone() })?;
            values.insert(id.clone(), ColumnValue::infer(&column.column_type, text)?);
        }
        Ok(values)
    }
}

impl<K: Into<String>, V: Into<ColumnValue>> FromIterator<(K, V)> for ColumnValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (id, value) in iter {
            values.insert(id, value);
        }
        values
    }
}
