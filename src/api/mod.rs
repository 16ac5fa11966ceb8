//! Typed operations over the Monday.com GraphQL API.
//!
//! Each public operation is a method on [`MondayClient`] that validates its
//! arguments, renders GraphQL text with a pure `build_*` function, executes
//! it and maps the `data` object to typed records.
//!
//! Lookups that find nothing return an empty `Vec` or `None` and log a
//! warning; they are never errors.
//!
//! # Example
//!
//! ```rust,ignore
//! use monday_api::{ProfileStore, Session};
//! use monday_api::api::{ItemQuery, NewItem, ColumnValue, ColumnValues};
//!
//! let mut session = Session::new(ProfileStore::default_location()?);
//! session.activate("work")?;
//! let client = session.client()?;
//!
//! let items = client
//!     .get_board_items(1234, &ItemQuery { fetch_all: true, ..Default::default() })
//!     .await?;
//!
//! let values = ColumnValues::new().with("status", ColumnValue::status("Done"));
//! client
//!     .update_item(1234, items[0].id, &values, false, false)
//!     .await?;
//! ```

mod boards;
mod column_values;
mod columns;
mod de;
mod errors;
mod groups;
mod items;
mod updates;
mod users;
mod workspaces;

pub use boards::{
    build_archive_board_mutation, build_board_query, build_boards_query,
    build_create_board_mutation, build_delete_board_mutation, Board, BoardKind, BoardQuery,
    NewBoard,
};
pub use column_values::{ColumnValue, ColumnValues};
pub use columns::{
    build_columns_query, build_create_column_mutation, Column, ColumnType, NewColumn,
};
pub use errors::MondayError;
pub use groups::{
    build_create_group_mutation, build_delete_group_mutation, build_groups_query, Group,
    GroupRef,
};
pub use items::{
    build_archive_item_mutation, build_change_column_values_mutation,
    build_create_item_mutation, build_create_subitem_mutation, build_delete_item_mutation,
    build_duplicate_item_mutation, build_first_items_page_query, build_items_query,
    build_move_item_mutation, build_next_items_page_query, BoardRef, Item, ItemColumnValue,
    ItemLookup, ItemQuery, NewItem, ITEMS_PER_REQUEST,
};
pub use updates::{build_create_update_mutation, build_item_updates_query, Update};
pub use users::{build_current_user_query, build_users_query, User, UserKind, UserQuery, UserRef};
pub use workspaces::{build_workspaces_query, Workspace};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::clients::graphql::GraphqlClient;
use crate::config::MondayConfig;

/// Result of a mutation that can optionally return the affected object.
#[derive(Clone, Debug, PartialEq)]
pub enum MutationResult<T> {
    /// The full object, requested with the operation's `return_*` flag.
    Object(T),
    /// A human-readable confirmation.
    Success(String),
}

impl<T> MutationResult<T> {
    /// Returns the object, if one was requested.
    pub fn into_object(self) -> Option<T> {
        match self {
            Self::Object(object) => Some(object),
            Self::Success(_) => None,
        }
    }

    /// Returns `true` for a confirmation message.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Client for the Monday.com operations.
///
/// Obtain one from [`Session::client`](crate::auth::Session::client) or
/// directly from a [`MondayConfig`].
///
/// # Thread Safety
///
/// `MondayClient` is `Send + Sync`. Operations never run requests
/// concurrently; pagination awaits each page before requesting the next.
#[derive(Debug)]
pub struct MondayClient {
    graphql: GraphqlClient,
}

// Verify MondayClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MondayClient>();
};

impl MondayClient {
    /// Creates a client for the given configuration.
    #[must_use]
    pub fn new(config: &MondayConfig) -> Self {
        Self {
            graphql: GraphqlClient::new(config),
        }
    }

    /// Wraps an existing executor.
    #[must_use]
    pub const fn from_graphql(graphql: GraphqlClient) -> Self {
        Self { graphql }
    }

    /// Returns the underlying executor.
    #[must_use]
    pub const fn graphql(&self) -> &GraphqlClient {
        &self.graphql
    }

    /// Executes arbitrary GraphQL text and returns its `data` object.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError::Remote`], [`MondayError::Transport`],
    /// [`MondayError::Decode`] or [`MondayError::MissingData`].
    pub async fn execute(&self, query: &str, variables: Option<Value>) -> Result<Value, MondayError> {
        self.graphql
            .query(query, variables)
            .await
            .map_err(|e| MondayError::from_graphql("execute", e))
    }

    async fn run<T: DeserializeOwned>(&self, context: &str, query: &str) -> Result<T, MondayError> {
        self.graphql
            .query_as(query, None)
            .await
            .map_err(|e| MondayError::from_graphql(context, e))
    }

    /// Runs a mutation and returns the value of its single top-level field.
    async fn mutate(&self, context: &str, query: &str, field: &str) -> Result<Value, MondayError> {
        let mut data: Value = self.run(context, query).await?;
        match data.get_mut(field).map(Value::take) {
            Some(Value::Null) | None => Err(MondayError::MissingData {
                context: context.to_string(),
            }),
            Some(value) => Ok(value),
        }
    }
}

fn decode<T: DeserializeOwned>(context: &str, value: Value) -> Result<T, MondayError> {
    serde_json::from_value(value).map_err(|source| MondayError::Decode {
        context: context.to_string(),
        source,
    })
}

/// The `{ id }` selection returned by mutations without `return_*`.
#[derive(Debug, Deserialize)]
struct Created {
    #[serde(deserialize_with = "de::id")]
    id: u64,
}
