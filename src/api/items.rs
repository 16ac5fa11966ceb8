//! Items and subitems.
//!
//! Board listings are paged through [`Pager`]; lookups by id are split into
//! requests of at most [`ITEMS_PER_REQUEST`] ids.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::instrument;

use super::{
    de, decode, ColumnType, ColumnValues, Created, GroupRef, MondayClient, MondayError,
    MutationResult,
};
use crate::pagination::{Page, Pager};
use crate::query::{check_range, quote, ArgumentError, Arguments, Selection, State};

/// Maximum number of ids Monday.com accepts in one `items` query.
pub const ITEMS_PER_REQUEST: usize = 100;

const DEFAULT_PAGE_LIMIT: u32 = 100;
const MAX_PAGE_LIMIT: u32 = 500;

/// An item on a board.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Item {
    /// The item id.
    #[serde(deserialize_with = "de::id")]
    pub id: u64,
    /// Item name.
    pub name: String,
    /// `active`, `archived` or `deleted`.
    #[serde(default)]
    pub state: Option<String>,
    /// When the item was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// When the item was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// The containing group.
    #[serde(default)]
    pub group: Option<GroupRef>,
    /// The containing board.
    #[serde(default)]
    pub board: Option<BoardRef>,
    /// Column values, when requested.
    #[serde(default, deserialize_with = "de::nullable")]
    pub column_values: Vec<ItemColumnValue>,
    /// Subitems, when requested.
    #[serde(default, deserialize_with = "de::nullable")]
    pub subitems: Vec<Item>,
}

impl Item {
    /// Returns the id of the containing board, if known.
    #[must_use]
    pub fn board_id(&self) -> Option<u64> {
        self.board.as_ref().map(|board| board.id)
    }

    /// Returns the id of the containing group, if known.
    #[must_use]
    pub fn group_id(&self) -> Option<&str> {
        self.group.as_ref().map(|group| group.id.as_str())
    }

    /// Returns the value of one column, if it was fetched.
    #[must_use]
    pub fn column_value(&self, column_id: &str) -> Option<&ItemColumnValue> {
        self.column_values.iter().find(|value| value.id == column_id)
    }
}

/// A `{ id name }` reference to a board, as embedded in items.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct BoardRef {
    /// The board id.
    #[serde(deserialize_with = "de::id")]
    pub id: u64,
    /// Board name.
    #[serde(default)]
    pub name: Option<String>,
}

/// A column value as reported on an item.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ItemColumnValue {
    /// Column id.
    pub id: String,
    /// Display text.
    #[serde(default)]
    pub text: Option<String>,
    /// Raw JSON value.
    #[serde(default)]
    pub value: Option<String>,
    /// Declared column type.
    #[serde(default, rename = "type")]
    pub column_type: Option<ColumnType>,
}

/// Parameters for [`MondayClient::get_board_items`].
#[derive(Clone, Debug)]
pub struct ItemQuery {
    /// Page size, 1 to 500 (default: 100).
    pub limit: Option<u32>,
    /// Keep only items in these groups.
    pub group_ids: Vec<String>,
    /// Keep only items in this state (default: active).
    pub state: State,
    /// Fetch column values.
    pub include_column_values: bool,
    /// Fetch subitems.
    pub include_subitems: bool,
    /// Follow cursors until the last page instead of stopping after one.
    pub fetch_all: bool,
}

impl Default for ItemQuery {
    fn default() -> Self {
        Self {
            limit: Some(DEFAULT_PAGE_LIMIT),
            group_ids: Vec::new(),
            state: State::Active,
            include_column_values: false,
            include_subitems: false,
            fetch_all: false,
        }
    }
}

impl ItemQuery {
    fn page_limit(&self) -> Result<u32, ArgumentError> {
        check_range(
            "limit",
            self.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
            1,
            MAX_PAGE_LIMIT,
        )
    }

    /// Returns `true` if `item` passes the group and state filters.
    #[must_use]
    pub fn keeps(&self, item: &Item) -> bool {
        let in_group = self.group_ids.is_empty()
            || item
                .group_id()
                .is_some_and(|id| self.group_ids.iter().any(|group| group == id));
        in_group && self.state.matches(item.state.as_deref())
    }
}

/// Parameters for [`MondayClient::get_items`].
#[derive(Clone, Debug, Default)]
pub struct ItemLookup {
    /// Keep only items that belong to this board.
    pub board_id: Option<u64>,
    /// Fetch column values.
    pub include_column_values: bool,
}

/// Parameters for [`MondayClient::create_item`].
#[derive(Clone, Debug)]
pub struct NewItem {
    /// Target board.
    pub board_id: u64,
    /// Item name.
    pub name: String,
    /// Target group; the board's top group when `None`.
    pub group_id: Option<String>,
    /// Initial column values.
    pub column_values: ColumnValues,
    /// Create status or dropdown labels that do not exist yet.
    pub create_labels_if_missing: bool,
}

impl NewItem {
    /// Creates an item description with a board and a name.
    pub fn new(board_id: u64, name: impl Into<String>) -> Self {
        Self {
            board_id,
            name: name.into(),
            group_id: None,
            column_values: ColumnValues::new(),
            create_labels_if_missing: false,
        }
    }
}

fn item_fields(include_column_values: bool, include_subitems: bool) -> Selection {
    const COLUMN_VALUES: &str = "column_values { id text value type }";

    let subitems = Selection::new(["id", "name", "state", "board { id name }"])
        .with_if(include_column_values, COLUMN_VALUES);
    Selection::new([
        "id",
        "name",
        "state",
        "created_at",
        "updated_at",
        "group { id title }",
        "board { id name }",
    ])
    .with_if(include_column_values, COLUMN_VALUES)
    .with_if(include_subitems, format!("subitems {subitems}"))
}

/// Renders the first page of a board's items.
///
/// # Errors
///
/// Returns [`ArgumentError::OutOfRange`] for a limit outside 1..=500.
pub fn build_first_items_page_query(
    board_id: u64,
    params: &ItemQuery,
) -> Result<String, ArgumentError> {
    let limit = params.page_limit()?;
    Ok(format!(
        "query {{ boards(ids: [{board_id}]) {{ items_page(limit: {limit}) {{ cursor items {} }} }} }}",
        item_fields(params.include_column_values, params.include_subitems)
    ))
}

/// Renders the page following `cursor`.
///
/// # Errors
///
/// Returns [`ArgumentError::OutOfRange`] for a limit outside 1..=500.
pub fn build_next_items_page_query(
    cursor: &str,
    params: &ItemQuery,
) -> Result<String, ArgumentError> {
    let args = Arguments::new()
        .raw("limit", params.page_limit()?)
        .string("cursor", cursor);
    Ok(format!(
        "query {{ next_items_page{args} {{ cursor items {} }} }}",
        item_fields(params.include_column_values, params.include_subitems)
    ))
}

/// Renders an `items` lookup by id.
///
/// # Errors
///
/// Returns [`ArgumentError::Empty`] for no ids and
/// [`ArgumentError::OutOfRange`] for more than [`ITEMS_PER_REQUEST`].
pub fn build_items_query(ids: &[u64], include_column_values: bool) -> Result<String, ArgumentError> {
    if ids.is_empty() {
        return Err(ArgumentError::Empty { name: "ids" });
    }
    let count = u32::try_from(ids.len()).unwrap_or(u32::MAX);
    #[allow(clippy::cast_possible_truncation)]
    let limit = check_range("ids", count, 1, ITEMS_PER_REQUEST as u32)?;
    let args = Arguments::new().ids("ids", ids).raw("limit", limit);
    Ok(format!(
        "query {{ items{args} {} }}",
        item_fields(include_column_values, false)
    ))
}

fn mutation_fields(return_item: bool) -> Selection {
    if return_item {
        item_fields(true, false)
    } else {
        Selection::new(["id"])
    }
}

/// Renders the `create_item` mutation.
///
/// # Errors
///
/// Returns [`ArgumentError::Empty`] for an empty item name.
pub fn build_create_item_mutation(
    item: &NewItem,
    return_item: bool,
) -> Result<String, ArgumentError> {
    if item.name.trim().is_empty() {
        return Err(ArgumentError::Empty { name: "item_name" });
    }
    let mut args = Arguments::new()
        .raw("board_id", item.board_id)
        .string("item_name", &item.name)
        .string_opt("group_id", item.group_id.as_deref());
    if !item.column_values.is_empty() {
        args = args.string("column_values", &item.column_values.to_json_string());
    }
    if item.create_labels_if_missing {
        args = args.raw("create_labels_if_missing", true);
    }
    Ok(format!(
        "mutation {{ create_item{args} {} }}",
        mutation_fields(return_item)
    ))
}

/// Renders the `create_subitem` mutation.
///
/// # Errors
///
/// Returns [`ArgumentError::Empty`] for an empty item name.
pub fn build_create_subitem_mutation(
    parent_item_id: u64,
    name: &str,
    column_values: &ColumnValues,
    return_item: bool,
) -> Result<String, ArgumentError> {
    if name.trim().is_empty() {
        return Err(ArgumentError::Empty { name: "item_name" });
    }
    let mut args = Arguments::new()
        .raw("parent_item_id", parent_item_id)
        .string("item_name", name);
    if !column_values.is_empty() {
        args = args.string("column_values", &column_values.to_json_string());
    }
    Ok(format!(
        "mutation {{ create_subitem{args} {} }}",
        mutation_fields(return_item)
    ))
}

/// Renders the `change_multiple_column_values` mutation.
///
/// # Errors
///
/// Returns [`ArgumentError::Empty`] when `column_values` is empty.
pub fn build_change_column_values_mutation(
    board_id: u64,
    item_id: u64,
    column_values: &ColumnValues,
    create_labels_if_missing: bool,
    return_item: bool,
) -> Result<String, ArgumentError> {
    if column_values.is_empty() {
        return Err(ArgumentError::Empty {
            name: "column_values",
        });
    }
    let mut args = Arguments::new()
        .raw("board_id", board_id)
        .raw("item_id", item_id)
        .string("column_values", &column_values.to_json_string());
    if create_labels_if_missing {
        args = args.raw("create_labels_if_missing", true);
    }
    Ok(format!(
        "mutation {{ change_multiple_column_values{args} {} }}",
        mutation_fields(return_item)
    ))
}

/// Renders the `move_item_to_group` mutation.
///
/// # Errors
///
/// Returns [`ArgumentError::Empty`] for an empty group id.
pub fn build_move_item_mutation(item_id: u64, group_id: &str) -> Result<String, ArgumentError> {
    if group_id.trim().is_empty() {
        return Err(ArgumentError::Empty { name: "group_id" });
    }
    Ok(format!(
        "mutation {{ move_item_to_group(item_id: {item_id}, group_id: {}) {{ id }} }}",
        quote(group_id)
    ))
}

/// Renders the `archive_item` mutation.
#[must_use]
pub fn build_archive_item_mutation(item_id: u64) -> String {
    format!("mutation {{ archive_item(item_id: {item_id}) {{ id }} }}")
}

/// Renders the `delete_item` mutation.
#[must_use]
pub fn build_delete_item_mutation(item_id: u64) -> String {
    format!("mutation {{ delete_item(item_id: {item_id}) {{ id }} }}")
}

/// Renders the `duplicate_item` mutation.
#[must_use]
pub fn build_duplicate_item_mutation(board_id: u64, item_id: u64, with_updates: bool) -> String {
    format!(
        "mutation {{ duplicate_item(board_id: {board_id}, item_id: {item_id}, with_updates: {with_updates}) {} }}",
        item_fields(true, false)
    )
}

const IDS_IN_CONTEXT: usize = 5;

/// Renders ids for error context, listing at most [`IDS_IN_CONTEXT`].
fn summarize_ids(ids: &[u64]) -> String {
    if ids.len() <= IDS_IN_CONTEXT {
        return format!("{ids:?}");
    }
    let shown: Vec<String> = ids[..IDS_IN_CONTEXT].iter().map(u64::to_string).collect();
    format!("[{}, ...] ({} ids)", shown.join(", "), ids.len())
}

#[derive(Deserialize)]
struct ItemsPage {
    #[serde(default)]
    cursor: Option<String>,
    #[serde(default, deserialize_with = "de::nullable")]
    items: Vec<Item>,
}

impl From<ItemsPage> for Page<Item> {
    fn from(page: ItemsPage) -> Self {
        Self::new(page.items, page.cursor)
    }
}

impl MondayClient {
    /// Lists a board's items, following cursors when `fetch_all` is set.
    ///
    /// Group and state filters are applied to each page as it arrives.
    /// Returns an empty list when the board does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError`] on invalid arguments or if any page fails.
    #[instrument(skip(self, params), fields(fetch_all = params.fetch_all))]
    pub async fn get_board_items(
        &self,
        board_id: u64,
        params: &ItemQuery,
    ) -> Result<Vec<Item>, MondayError> {
        let context = format!("get_board_items: board {board_id}");
        params
            .page_limit()
            .map_err(|e| MondayError::invalid_argument(&context, e))?;

        let context = context.as_str();
        let items = Pager::new(params.fetch_all)
            .collect(
                move |cursor| self.fetch_items_page(context, board_id, params, cursor),
                |item| params.keeps(item),
            )
            .await?;
        if items.is_empty() {
            tracing::warn!("No items found on board {}", board_id);
        }
        Ok(items)
    }

    async fn fetch_items_page(
        &self,
        context: &str,
        board_id: u64,
        params: &ItemQuery,
        cursor: Option<String>,
    ) -> Result<Page<Item>, MondayError> {
        #[derive(Deserialize)]
        struct FirstPage {
            #[serde(default, deserialize_with = "de::nullable")]
            boards: Vec<BoardItems>,
        }

        #[derive(Deserialize)]
        struct BoardItems {
            #[serde(default)]
            items_page: Option<ItemsPage>,
        }

        #[derive(Deserialize)]
        struct NextPage {
            #[serde(default)]
            next_items_page: Option<ItemsPage>,
        }

        let Some(cursor) = cursor else {
            let query = build_first_items_page_query(board_id, params)
                .map_err(|e| MondayError::invalid_argument(context, e))?;
            let response: FirstPage = self.run(context, &query).await?;
            let Some(board) = response.boards.into_iter().next() else {
                tracing::warn!("Board {} not found", board_id);
                return Ok(Page::empty());
            };
            return Ok(board.items_page.map_or_else(Page::empty, Page::from));
        };

        let query = build_next_items_page_query(&cursor, params)
            .map_err(|e| MondayError::invalid_argument(context, e))?;
        let response: NextPage = self.run(context, &query).await?;
        Ok(response
            .next_items_page
            .map_or_else(Page::empty, Page::from))
    }

    /// Fetches items by id.
    ///
    /// Ids are requested in batches of [`ITEMS_PER_REQUEST`]. When
    /// `lookup.board_id` is set, items on other boards are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError`] for an empty id list or a failed request.
    #[instrument(skip(self, ids, lookup), fields(count = ids.len()))]
    pub async fn get_items(
        &self,
        ids: &[u64],
        lookup: &ItemLookup,
    ) -> Result<Vec<Item>, MondayError> {
        #[derive(Deserialize)]
        struct Response {
            #[serde(default, deserialize_with = "de::nullable")]
            items: Vec<Item>,
        }

        let context = match lookup.board_id {
            Some(board_id) => format!("get_items: items {} on board {board_id}", summarize_ids(ids)),
            None => format!("get_items: items {}", summarize_ids(ids)),
        };
        if ids.is_empty() {
            return Err(MondayError::invalid_argument(
                context,
                ArgumentError::Empty { name: "ids" },
            ));
        }

        let mut items = Vec::new();
        for batch in ids.chunks(ITEMS_PER_REQUEST) {
            let query = build_items_query(batch, lookup.include_column_values)
                .map_err(|e| MondayError::invalid_argument(&context, e))?;
            let response: Response = self.run(&context, &query).await?;
            items.extend(
                response
                    .items
                    .into_iter()
                    .filter(|item| lookup.board_id.map_or(true, |id| item.board_id() == Some(id))),
            );
        }

        if items.is_empty() {
            tracing::warn!("No items found for ids {}", summarize_ids(ids));
        }
        Ok(items)
    }

    /// Creates an item.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError`] on invalid arguments or a failed request.
    #[instrument(skip(self, item), fields(board_id = item.board_id))]
    pub async fn create_item(
        &self,
        item: &NewItem,
        return_item: bool,
    ) -> Result<MutationResult<Item>, MondayError> {
        let context = format!("create_item: board {}", item.board_id);
        let query = build_create_item_mutation(item, return_item)
            .map_err(|e| MondayError::invalid_argument(&context, e))?;
        let value = self.mutate(&context, &query, "create_item").await?;
        if return_item {
            return Ok(MutationResult::Object(decode(&context, value)?));
        }
        let created: Created = decode(&context, value)?;
        Ok(MutationResult::Success(format!(
            "Item {} created on board {}",
            created.id, item.board_id
        )))
    }

    /// Creates a subitem under an item.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError`] on invalid arguments or a failed request.
    #[instrument(skip(self, column_values))]
    pub async fn create_subitem(
        &self,
        parent_item_id: u64,
        name: &str,
        column_values: &ColumnValues,
        return_item: bool,
    ) -> Result<MutationResult<Item>, MondayError> {
        let context = format!("create_subitem: parent item {parent_item_id}");
        let query = build_create_subitem_mutation(parent_item_id, name, column_values, return_item)
            .map_err(|e| MondayError::invalid_argument(&context, e))?;
        let value = self.mutate(&context, &query, "create_subitem").await?;
        if return_item {
            return Ok(MutationResult::Object(decode(&context, value)?));
        }
        let created: Created = decode(&context, value)?;
        Ok(MutationResult::Success(format!(
            "Subitem {} created under item {parent_item_id}",
            created.id
        )))
    }

    /// Changes several column values of an item at once.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError`] on invalid arguments or a failed request.
    #[instrument(skip(self, column_values))]
    pub async fn update_item(
        &self,
        board_id: u64,
        item_id: u64,
        column_values: &ColumnValues,
        create_labels_if_missing: bool,
        return_item: bool,
    ) -> Result<MutationResult<Item>, MondayError> {
        let context = format!("update_item: item {item_id} on board {board_id}");
        let query = build_change_column_values_mutation(
            board_id,
            item_id,
            column_values,
            create_labels_if_missing,
            return_item,
        )
        .map_err(|e| MondayError::invalid_argument(&context, e))?;
        let value = self
            .mutate(&context, &query, "change_multiple_column_values")
            .await?;
        if return_item {
            return Ok(MutationResult::Object(decode(&context, value)?));
        }
        Ok(MutationResult::Success(format!(
            "Item {item_id} updated on board {board_id}"
        )))
    }

    /// Moves an item to another group on its board.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError`] on invalid arguments or a failed request.
    #[instrument(skip(self))]
    pub async fn move_item_to_group(
        &self,
        item_id: u64,
        group_id: &str,
    ) -> Result<String, MondayError> {
        let context = format!("move_item_to_group: item {item_id} to group '{group_id}'");
        let query = build_move_item_mutation(item_id, group_id)
            .map_err(|e| MondayError::invalid_argument(&context, e))?;
        self.mutate(&context, &query, "move_item_to_group").await?;
        Ok(format!("Item {item_id} moved to group '{group_id}'"))
    }

    /// Archives an item.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn archive_item(&self, item_id: u64) -> Result<String, MondayError> {
        let context = format!("archive_item: item {item_id}");
        self.mutate(&context, &build_archive_item_mutation(item_id), "archive_item")
            .await?;
        Ok(format!("Item {item_id} archived"))
    }

    /// Deletes an item.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn delete_item(&self, item_id: u64) -> Result<String, MondayError> {
        let context = format!("delete_item: item {item_id}");
        self.mutate(&context, &build_delete_item_mutation(item_id), "delete_item")
            .await?;
        Ok(format!("Item {item_id} deleted"))
    }

    /// Duplicates an item, optionally with its updates, and returns the copy.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn duplicate_item(
        &self,
        board_id: u64,
        item_id: u64,
        with_updates: bool,
    ) -> Result<Item, MondayError> {
        let context = format!("duplicate_item: item {item_id} on board {board_id}");
        let query = build_duplicate_item_mutation(board_id, item_id, with_updates);
        let value = self.mutate(&context, &query, "duplicate_item").await?;
        decode(&context, value)
    }

    /// Turns raw text values into typed column values using the board's
    /// declared column types.
    ///
    /// Issues a single column lookup restricted to the ids in `raw`.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError::InvalidArgument`] for unknown columns or
    /// malformed values, or any error from the column lookup.
    #[instrument(skip(self, raw))]
    pub async fn resolve_column_values(
        &self,
        board_id: u64,
        raw: &BTreeMap<String, String>,
    ) -> Result<ColumnValues, MondayError> {
        if raw.is_empty() {
            return Ok(ColumnValues::new());
        }
        let column_ids: Vec<String> = raw.keys().cloned().collect();
        let columns = self.get_board_columns(board_id, &column_ids).await?;
        ColumnValues::infer(&columns, raw).map_err(|e| {
            MondayError::invalid_argument(format!("resolve_column_values: board {board_id}"), e)
        })
    }
}
