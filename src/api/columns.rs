//! Board columns and their declared types.

use std::fmt;

use serde::Deserialize;
use tracing::instrument;

use super::{decode, MondayClient, MondayError, MutationResult};
use crate::query::{check_name, ArgumentError, Arguments, Selection};

pub(super) const COLUMN_FIELDS: [&str; 5] = ["id", "title", "type", "description", "settings_str"];

/// The declared type of a board column.
///
/// Parsed from the `type` field Monday.com reports. Legacy names (`color`,
/// `multiple-person`, `numeric`, `boolean`, `long-text`) map to their
/// current kinds; anything else is kept as [`ColumnType::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ColumnType {
    /// Single line text.
    Text,
    /// Multi line text.
    LongText,
    /// Status labels.
    Status,
    /// Date with optional time.
    Date,
    /// People and teams.
    People,
    /// Numbers.
    Numbers,
    /// Dropdown labels.
    Dropdown,
    /// Checkbox.
    Checkbox,
    /// Email address.
    Email,
    /// Phone number.
    Phone,
    /// URL with text.
    Link,
    /// Date range.
    Timeline,
    /// Star rating.
    Rating,
    /// Tags.
    Tags,
    /// Any other type, by its reported name.
    Other(String),
}

impl ColumnType {
    /// Returns the `ColumnType` enum literal used by mutations.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::LongText => "long_text",
            Self::Status => "status",
            Self::Date => "date",
            Self::People => "people",
            Self::Numbers => "numbers",
            Self::Dropdown => "dropdown",
            Self::Checkbox => "checkbox",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Link => "link",
            Self::Timeline => "timeline",
            Self::Rating => "rating",
            Self::Tags => "tags",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for ColumnType {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Self::Text,
            "long_text" | "long-text" => Self::LongText,
            "status" | "color" => Self::Status,
            "date" => Self::Date,
            "people" | "multiple-person" => Self::People,
            "numbers" | "numeric" => Self::Numbers,
            "dropdown" => Self::Dropdown,
            "checkbox" | "boolean" => Self::Checkbox,
            "email" => Self::Email,
            "phone" => Self::Phone,
            "link" => Self::Link,
            "timeline" | "timerange" => Self::Timeline,
            "rating" => Self::Rating,
            "tags" | "tag" => Self::Tags,
            _ => Self::Other(value.trim().to_string()),
        }
    }
}

impl From<String> for ColumnType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A column declared on a board.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Column {
    /// Column id, unique within the board.
    pub id: String,
    /// Column title.
    pub title: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Column description.
    #[serde(default)]
    pub description: Option<String>,
    /// Raw JSON settings (labels, formats).
    #[serde(default)]
    pub settings_str: Option<String>,
}

/// Parameters for [`MondayClient::create_column`].
#[derive(Clone, Debug)]
pub struct NewColumn {
    /// Column title.
    pub title: String,
    /// Column type.
    pub column_type: ColumnType,
    /// Optional description.
    pub description: Option<String>,
    /// Explicit column id; generated by Monday.com when `None`.
    pub id: Option<String>,
}

impl NewColumn {
    /// Creates a column description with a title and type.
    pub fn new(title: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            title: title.into(),
            column_type,
            description: None,
            id: None,
        }
    }
}

/// Renders the query listing a board's columns, optionally filtered by id.
#[must_use]
pub fn build_columns_query(board_id: u64, column_ids: &[String]) -> String {
    let args = Arguments::new().strings("ids", column_ids);
    format!(
        "query {{ boards(ids: [{board_id}]) {{ columns{args} {} }} }}",
        Selection::new(COLUMN_FIELDS)
    )
}

/// Renders the `create_column` mutation.
///
/// # Errors
///
/// Returns [`ArgumentError::Empty`] for an empty title and
/// [`ArgumentError::InvalidName`] for an unusable custom column type.
pub fn build_create_column_mutation(
    board_id: u64,
    column: &NewColumn,
    return_column: bool,
) -> Result<String, ArgumentError> {
    if column.title.trim().is_empty() {
        return Err(ArgumentError::Empty { name: "title" });
    }
    let column_type = check_name("column_type", column.column_type.as_str())?;
    let args = Arguments::new()
        .raw("board_id", board_id)
        .string("title", &column.title)
        .raw("column_type", column_type)
        .string_opt("description", column.description.as_deref())
        .string_opt("id", column.id.as_deref());
    let fields = if return_column {
        Selection::new(COLUMN_FIELDS)
    } else {
        Selection::new(["id"])
    };
    Ok(format!("mutation {{ create_column{args} {fields} }}"))
}

impl MondayClient {
    /// Lists a board's columns, optionally restricted to `column_ids`.
    ///
    /// Returns an empty list when the board does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn get_board_columns(
        &self,
        board_id: u64,
        column_ids: &[String],
    ) -> Result<Vec<Column>, MondayError> {
        #[derive(Deserialize)]
        struct Response {
            #[serde(default, deserialize_with = "super::de::nullable")]
            boards: Vec<BoardColumns>,
        }

        #[derive(Deserialize)]
        struct BoardColumns {
            #[serde(default, deserialize_with = "super::de::nullable")]
            columns: Vec<Column>,
        }

        let context = format!("get_board_columns: board {board_id}");
        let query = build_columns_query(board_id, column_ids);
        let response: Response = self.run(&context, &query).await?;
        let Some(board) = response.boards.into_iter().next() else {
            tracing::warn!("Board {} not found", board_id);
            return Ok(Vec::new());
        };
        Ok(board.columns)
    }

    /// Adds a column to a board.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError`] on invalid arguments or a failed request.
    #[instrument(skip(self, column), fields(title = %column.title))]
    pub async fn create_column(
        &self,
        board_id: u64,
        column: &NewColumn,
        return_column: bool,
    ) -> Result<MutationResult<Column>, MondayError> {
        #[derive(Deserialize)]
        struct CreatedColumn {
            id: String,
        }

        let context = format!("create_column: board {board_id}");
        let query = build_create_column_mutation(board_id, column, return_column)
            .map_err(|e| MondayError::invalid_argument(&context, e))?;
        let value = self.mutate(&context, &query, "create_column").await?;
        if return_column {
            return Ok(MutationResult::Object(decode(&context, value)?));
        }
        let created: CreatedColumn = decode(&context, value)?;
        Ok(MutationResult::Success(format!(
            "Column '{}' created on board {board_id}",
            created.id
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_type_parses_current_and_legacy_names() {
        assert_eq!(ColumnType::from("status"), ColumnType::Status);
        assert_eq!(ColumnType::from("color"), ColumnType::Status);
        assert_eq!(ColumnType::from("multiple-person"), ColumnType::People);
        assert_eq!(ColumnType::from("numeric"), ColumnType::Numbers);
        assert_eq!(ColumnType::from("long_text"), ColumnType::LongText);
        assert_eq!(
            ColumnType::from("mirror"),
            ColumnType::Other("mirror".to_string())
        );
    }

    #[test]
    fn test_column_deserializes_type_field() {
        let column: Column = serde_json::from_str(
            r#"{"id": "status", "title": "Status", "type": "color", "settings_str": "{}"}"#,
        )
        .unwrap();
        assert_eq!(column.column_type, ColumnType::Status);
        assert_eq!(column.description, None);
    }

    #[test]
    fn test_columns_query_with_and_without_filter() {
        assert_eq!(
            build_columns_query(5, &[]),
            "query { boards(ids: [5]) { columns { id title type description settings_str } } }"
        );
        let query = build_columns_query(5, &["status".to_string(), "date4".to_string()]);
        assert!(query.contains(r#"columns(ids: ["status", "date4"])"#));
    }

    #[test]
    fn test_create_column_mutation() {
        let mut column = NewColumn::new("Due \"soon\"", ColumnType::Date);
        column.id = Some("due_date".to_string());
        let mutation = build_create_column_mutation(9, &column, false).unwrap();
        assert_eq!(
            mutation,
            r#"mutation { create_column(board_id: 9, title: "Due \"soon\"", column_type: date, id: "due_date") { id } }"#
        );
    }

    #[test]
    fn test_create_column_rejects_bad_input() {
        let column = NewColumn::new("  ", ColumnType::Text);
        assert_eq!(
            build_create_column_mutation(1, &column, true),
            Err(ArgumentError::Empty { name: "title" })
        );

        let column = NewColumn::new("X", ColumnType::Other("bad type)".to_string()));
        assert!(matches!(
            build_create_column_mutation(1, &column, true),
            Err(ArgumentError::InvalidName { .. })
        ));
    }
}
