//! Board groups.

use serde::Deserialize;
use tracing::instrument;

use super::{de, decode, MondayClient, MondayError, MutationResult};
use crate::query::{ArgumentError, Arguments, Selection};

pub(super) const GROUP_FIELDS: [&str; 6] = ["id", "title", "color", "position", "archived", "deleted"];

/// A group of items on a board.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Group {
    /// Group id, unique within the board.
    pub id: String,
    /// Group title.
    pub title: String,
    /// Display color.
    #[serde(default)]
    pub color: Option<String>,
    /// Sort position.
    #[serde(default)]
    pub position: Option<String>,
    /// Whether the group is archived.
    #[serde(default)]
    pub archived: Option<bool>,
    /// Whether the group is deleted.
    #[serde(default)]
    pub deleted: Option<bool>,
}

/// A `{ id title }` reference to a group, as embedded in items.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct GroupRef {
    /// Group id.
    pub id: String,
    /// Group title.
    #[serde(default)]
    pub title: Option<String>,
}

/// Renders the query listing a board's groups.
#[must_use]
pub fn build_groups_query(board_id: u64) -> String {
    format!(
        "query {{ boards(ids: [{board_id}]) {{ groups {} }} }}",
        Selection::new(GROUP_FIELDS)
    )
}

/// Renders the `create_group` mutation.
///
/// # Errors
///
/// Returns [`ArgumentError::Empty`] for an empty group name.
pub fn build_create_group_mutation(
    board_id: u64,
    group_name: &str,
    return_group: bool,
) -> Result<String, ArgumentError> {
    if group_name.trim().is_empty() {
        return Err(ArgumentError::Empty { name: "group_name" });
    }
    let args = Arguments::new()
        .raw("board_id", board_id)
        .string("group_name", group_name);
    let fields = if return_group {
        Selection::new(GROUP_FIELDS)
    } else {
        Selection::new(["id"])
    };
    Ok(format!("mutation {{ create_group{args} {fields} }}"))
}

/// Renders the `delete_group` mutation.
///
/// # Errors
///
/// Returns [`ArgumentError::Empty`] for an empty group id.
pub fn build_delete_group_mutation(board_id: u64, group_id: &str) -> Result<String, ArgumentError> {
    if group_id.trim().is_empty() {
        return Err(ArgumentError::Empty { name: "group_id" });
    }
    let args = Arguments::new()
        .raw("board_id", board_id)
        .string("group_id", group_id);
    Ok(format!("mutation {{ delete_group{args} {{ id deleted }} }}"))
}

impl MondayClient {
    /// Lists a board's groups.
    ///
    /// Returns an empty list when the board does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn get_board_groups(&self, board_id: u64) -> Result<Vec<Group>, MondayError> {
        #[derive(Deserialize)]
        struct Response {
            #[serde(default, deserialize_with = "de::nullable")]
            boards: Vec<BoardGroups>,
        }

        #[derive(Deserialize)]
        struct BoardGroups {
            #[serde(default, deserialize_with = "de::nullable")]
            groups: Vec<Group>,
        }

        let context = format!("get_board_groups: board {board_id}");
        let response: Response = self.run(&context, &build_groups_query(board_id)).await?;
        let Some(board) = response.boards.into_iter().next() else {
            tracing::warn!("Board {} not found", board_id);
            return Ok(Vec::new());
        };
        Ok(board.groups)
    }

    /// Creates a group on a board.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError`] on invalid arguments or a failed request.
    #[instrument(skip(self))]
    pub async fn create_group(
        &self,
        board_id: u64,
        group_name: &str,
        return_group: bool,
    ) -> Result<MutationResult<Group>, MondayError> {
        let context = format!("create_group: board {board_id}");
        let query = build_create_group_mutation(board_id, group_name, return_group)
            .map_err(|e| MondayError::invalid_argument(&context, e))?;
        let value = self.mutate(&context, &query, "create_group").await?;
        if return_group {
            return Ok(MutationResult::Object(decode(&context, value)?));
        }
        let created: GroupRef = decode(&context, value)?;
        Ok(MutationResult::Success(format!(
            "Group '{}' created on board {board_id}",
            created.id
        )))
    }

    /// Deletes a group and its items.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError`] on invalid arguments or a failed request.
    #[instrument(skip(self))]
    pub async fn delete_group(&self, board_id: u64, group_id: &str) -> Result<String, MondayError> {
        let context = format!("delete_group: group '{group_id}' on board {board_id}");
        let query = build_delete_group_mutation(board_id, group_id)
            .map_err(|e| MondayError::invalid_argument(&context, e))?;
        self.mutate(&context, &query, "delete_group").await?;
        Ok(format!("Group '{group_id}' deleted from board {board_id}"))
    }
}
