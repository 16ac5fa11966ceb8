//! Boards.

use serde::Deserialize;
use tracing::instrument;

use super::columns::COLUMN_FIELDS;
use super::groups::GROUP_FIELDS;
use super::users::UserRef;
use super::{de, decode, Column, Created, Group, MondayClient, MondayError, MutationResult};
use crate::query::{check_range, ArgumentError, Arguments, Selection, State};

const DEFAULT_LIMIT: u32 = 25;
const MAX_LIMIT: u32 = 500;

/// A board.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Board {
    /// The board id.
    #[serde(deserialize_with = "de::id")]
    pub id: u64,
    /// Board name.
    pub name: String,
    /// Board description.
    #[serde(default)]
    pub description: Option<String>,
    /// `active`, `archived` or `deleted`.
    #[serde(default)]
    pub state: Option<String>,
    /// `public`, `private` or `share`.
    #[serde(default)]
    pub board_kind: Option<String>,
    /// The containing workspace; `None` for the main workspace.
    #[serde(default, deserialize_with = "de::opt_id")]
    pub workspace_id: Option<u64>,
    /// Number of items on the board.
    #[serde(default)]
    pub items_count: Option<u64>,
    /// Board URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Columns, when requested.
    #[serde(default, deserialize_with = "de::nullable")]
    pub columns: Vec<Column>,
    /// Groups, when requested.
    #[serde(default, deserialize_with = "de::nullable")]
    pub groups: Vec<Group>,
    /// Owners, when requested.
    #[serde(default, deserialize_with = "de::nullable")]
    pub owners: Vec<UserRef>,
}

/// Board visibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoardKind {
    /// Visible to all account members.
    #[default]
    Public,
    /// Visible to subscribers only.
    Private,
    /// Shareable with guests.
    Share,
}

impl BoardKind {
    /// Returns the GraphQL enum literal.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Share => "share",
        }
    }
}

/// Parameters for [`MondayClient::get_boards`].
#[derive(Clone, Debug)]
pub struct BoardQuery {
    /// Only these board ids.
    pub ids: Vec<u64>,
    /// Page size, 1 to 500 (default: 25).
    pub limit: Option<u32>,
    /// Page number, starting at 1 (default: 1).
    pub page: Option<u32>,
    /// State filter (default: active).
    pub state: State,
    /// Visibility filter.
    pub kind: Option<BoardKind>,
    /// Only boards in these workspaces.
    pub workspace_ids: Vec<u64>,
    /// Include each board's columns.
    pub include_columns: bool,
    /// Include each board's groups.
    pub include_groups: bool,
    /// Include each board's owners.
    pub include_owners: bool,
}

impl Default for BoardQuery {
    fn default() -> Self {
        Self {
            ids: Vec::new(),
            limit: Some(DEFAULT_LIMIT),
            page: Some(1),
            state: State::Active,
            kind: None,
            workspace_ids: Vec::new(),
            include_columns: false,
            include_groups: false,
            include_owners: false,
        }
    }
}

fn board_fields(params: &BoardQuery) -> Selection {
    Selection::new([
        "id",
        "name",
        "description",
        "state",
        "board_kind",
        "workspace_id",
        "items_count",
        "url",
    ])
    .with_if(
        params.include_columns,
        format!("columns {}", Selection::new(COLUMN_FIELDS)),
    )
    .with_if(
        params.include_groups,
        format!("groups {}", Selection::new(GROUP_FIELDS)),
    )
    .with_if(params.include_owners, "owners { id name }")
}

/// Renders the `boards` query.
///
/// # Errors
///
/// Returns [`ArgumentError::OutOfRange`] for a limit outside 1..=500 or a
/// page of 0.
pub fn build_boards_query(params: &BoardQuery) -> Result<String, ArgumentError> {
    let limit = check_range("limit", params.limit.unwrap_or(DEFAULT_LIMIT), 1, MAX_LIMIT)?;
    let page = check_range("page", params.page.unwrap_or(1), 1, u32::MAX)?;
    let args = Arguments::new()
        .ids("ids", &params.ids)
        .raw("limit", limit)
        .raw("page", page)
        .raw("state", params.state)
        .raw_opt("board_kind", params.kind.map(|kind| kind.as_str()))
        .ids("workspace_ids", &params.workspace_ids);
    Ok(format!("query {{ boards{args} {} }}", board_fields(params)))
}

/// Renders the query for a single board, keeping the state filter and
/// include flags of `params`.
#[must_use]
pub fn build_board_query(board_id: u64, params: &BoardQuery) -> String {
    let args = Arguments::new()
        .ids("ids", &[board_id])
        .raw("limit", 1)
        .raw("state", params.state);
    format!("query {{ boards{args} {} }}", board_fields(params))
}

/// Parameters for [`MondayClient::create_board`].
#[derive(Clone, Debug)]
pub struct NewBoard {
    /// Board name.
    pub name: String,
    /// Board visibility.
    pub kind: BoardKind,
    /// Target workspace; the main workspace when `None`.
    pub workspace_id: Option<u64>,
    /// Target folder.
    pub folder_id: Option<u64>,
    /// Board description.
    pub description: Option<String>,
    /// Template board to copy.
    pub template_id: Option<u64>,
}

impl NewBoard {
    /// Creates a board description with a name and visibility.
    pub fn new(name: impl Into<String>, kind: BoardKind) -> Self {
        Self {
            name: name.into(),
            kind,
            workspace_id: None,
            folder_id: None,
            description: None,
            template_id: None,
        }
    }
}

/// Renders the `create_board` mutation.
///
/// # Errors
///
/// Returns [`ArgumentError::Empty`] for an empty board name.
pub fn build_create_board_mutation(
    board: &NewBoard,
    return_board: bool,
) -> Result<String, ArgumentError> {
    if board.name.trim().is_empty() {
        return Err(ArgumentError::Empty { name: "board_name" });
    }
    let args = Arguments::new()
        .string("board_name", &board.name)
        .raw("board_kind", board.kind.as_str())
        .raw_opt("workspace_id", board.workspace_id)
        .raw_opt("folder_id", board.folder_id)
        .string_opt("description", board.description.as_deref())
        .raw_opt("template_id", board.template_id);
    let fields = if return_board {
        board_fields(&BoardQuery::default())
    } else {
        Selection::new(["id"])
    };
    Ok(format!("mutation {{ create_board{args} {fields} }}"))
}

/// Renders the `archive_board` mutation.
#[must_use]
pub fn build_archive_board_mutation(board_id: u64) -> String {
    format!("mutation {{ archive_board(board_id: {board_id}) {{ id state }} }}")
}

/// Renders the `delete_board` mutation.
#[must_use]
pub fn build_delete_board_mutation(board_id: u64) -> String {
    format!("mutation {{ delete_board(board_id: {board_id}) {{ id state }} }}")
}

#[derive(Deserialize)]
struct BoardsResponse {
    #[serde(default, deserialize_with = "de::nullable")]
    boards: Vec<Board>,
}

impl MondayClient {
    /// Lists boards.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError`] on invalid arguments or a failed request.
    #[instrument(skip(self, params))]
    pub async fn get_boards(&self, params: &BoardQuery) -> Result<Vec<Board>, MondayError> {
        let context = if params.ids.is_empty() {
            "get_boards".to_string()
        } else {
            format!("get_boards: boards {:?}", params.ids)
        };
        let query =
            build_boards_query(params).map_err(|e| MondayError::invalid_argument(&context, e))?;
        let response: BoardsResponse = self.run(&context, &query).await?;
        if response.boards.is_empty() {
            tracing::warn!("No boards found");
        }
        Ok(response.boards)
    }

    /// Fetches one board, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError`] if the request fails.
    #[instrument(skip(self, params))]
    pub async fn get_board(
        &self,
        board_id: u64,
        params: &BoardQuery,
    ) -> Result<Option<Board>, MondayError> {
        let context = format!("get_board: board {board_id}");
        let query = build_board_query(board_id, params);
        let response: BoardsResponse = self.run(&context, &query).await?;
        let board = response.boards.into_iter().next();
        if board.is_none() {
            tracing::warn!("Board {} not found", board_id);
        }
        Ok(board)
    }

    /// Creates a board.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError`] on invalid arguments or a failed request.
    #[instrument(skip(self, board), fields(name = %board.name))]
    pub async fn create_board(
        &self,
        board: &NewBoard,
        return_board: bool,
    ) -> Result<MutationResult<Board>, MondayError> {
        let context = format!("create_board: '{}'", board.name);
        let query = build_create_board_mutation(board, return_board)
            .map_err(|e| MondayError::invalid_argument(&context, e))?;
        let value = self.mutate(&context, &query, "create_board").await?;
        if return_board {
            return Ok(MutationResult::Object(decode(&context, value)?));
        }
        let created: Created = decode(&context, value)?;
        Ok(MutationResult::Success(format!(
            "Board {} '{}' created",
            created.id, board.name
        )))
    }

    /// Archives a board.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn archive_board(&self, board_id: u64) -> Result<String, MondayError> {
        let context = format!("archive_board: board {board_id}");
        self.mutate(&context, &build_archive_board_mutation(board_id), "archive_board")
            .await?;
        Ok(format!("Board {board_id} archived"))
    }

    /// Deletes a board.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn delete_board(&self, board_id: u64) -> Result<String, MondayError> {
        let context = format!("delete_board: board {board_id}");
        self.mutate(&context, &build_delete_board_mutation(board_id), "delete_board")
            .await?;
        Ok(format!("Board {board_id} deleted"))
    }
}
