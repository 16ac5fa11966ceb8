//! Item updates (the comment thread on an item).

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::instrument;

use super::users::UserRef;
use super::{de, decode, Created, MondayClient, MondayError, MutationResult};
use crate::query::{check_range, ArgumentError, Arguments, Selection};

const UPDATE_FIELDS: [&str; 6] = [
    "id",
    "body",
    "text_body",
    "created_at",
    "updated_at",
    "creator { id name }",
];

/// An update posted on an item.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Update {
    /// The update id.
    #[serde(deserialize_with = "de::id")]
    pub id: u64,
    /// HTML body.
    #[serde(default)]
    pub body: String,
    /// Plain text body.
    #[serde(default)]
    pub text_body: Option<String>,
    /// When the update was posted.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// When the update was last edited.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Author.
    #[serde(default)]
    pub creator: Option<UserRef>,
}

/// Renders the query listing an item's updates.
///
/// # Errors
///
/// Returns [`ArgumentError::OutOfRange`] for a limit outside 1..=100.
pub fn build_item_updates_query(item_id: u64, limit: u32) -> Result<String, ArgumentError> {
    let limit = check_range("limit", limit, 1, 100)?;
    Ok(format!(
        "query {{ items(ids: [{item_id}]) {{ updates(limit: {limit}) {} }} }}",
        Selection::new(UPDATE_FIELDS)
    ))
}

/// Renders the `create_update` mutation.
///
/// # Errors
///
/// Returns [`ArgumentError::Empty`] for an empty body.
pub fn build_create_update_mutation(
    item_id: u64,
    body: &str,
    return_update: bool,
) -> Result<String, ArgumentError> {
    if body.trim().is_empty() {
        return Err(ArgumentError::Empty { name: "body" });
    }
    let args = Arguments::new()
        .raw("item_id", item_id)
        .string("body", body);
    let fields = if return_update {
        Selection::new(UPDATE_FIELDS)
    } else {
        Selection::new(["id"])
    };
    Ok(format!("mutation {{ create_update{args} {fields} }}"))
}

impl MondayClient {
    /// Lists the most recent updates on an item.
    ///
    /// Returns an empty list when the item does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError`] on invalid arguments or a failed request.
    #[instrument(skip(self))]
    pub async fn get_item_updates(
        &self,
        item_id: u64,
        limit: u32,
    ) -> Result<Vec<Update>, MondayError> {
        #[derive(Deserialize)]
        struct Response {
            #[serde(default, deserialize_with = "de::nullable")]
            items: Vec<ItemUpdates>,
        }

        #[derive(Deserialize)]
        struct ItemUpdates {
            #[serde(default, deserialize_with = "de::nullable")]
            updates: Vec<Update>,
        }

        let context = format!("get_item_updates: item {item_id}");
        let query = build_item_updates_query(item_id, limit)
            .map_err(|e| MondayError::invalid_argument(&context, e))?;
        let response: Response = self.run(&context, &query).await?;
        let Some(item) = response.items.into_iter().next() else {
            tracing::warn!("Item {} not found", item_id);
            return Ok(Vec::new());
        };
        Ok(item.updates)
    }

    /// Posts an update on an item.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError`] on invalid arguments or a failed request.
    #[instrument(skip(self, body))]
    pub async fn create_update(
        &self,
        item_id: u64,
        body: &str,
        return_update: bool,
    ) -> Result<MutationResult<Update>, MondayError> {
        let context = format!("create_update: item {item_id}");
        let query = build_create_update_mutation(item_id, body, return_update)
            .map_err(|e| MondayError::invalid_argument(&context, e))?;
        let value = self.mutate(&context, &query, "create_update").await?;
        if return_update {
            return Ok(MutationResult::Object(decode(&context, value)?));
        }
        let created: Created = decode(&context, value)?;
        Ok(MutationResult::Success(format!(
            "Update {} posted on item {item_id}",
            created.id
        )))
    }
}
