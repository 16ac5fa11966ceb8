//! Workspaces.

use serde::Deserialize;
use tracing::instrument;

use super::{de, MondayClient, MondayError};
use crate::query::{check_range, ArgumentError, Arguments, Selection, State};

/// A workspace grouping boards.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Workspace {
    /// The workspace id.
    #[serde(deserialize_with = "de::id")]
    pub id: u64,
    /// Workspace name.
    pub name: String,
    /// `open` or `closed`.
    #[serde(default)]
    pub kind: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// `active`, `archived` or `deleted`.
    #[serde(default)]
    pub state: Option<String>,
}

/// Renders the `workspaces` query.
///
/// # Errors
///
/// Returns [`ArgumentError::OutOfRange`] for a limit outside 1..=100.
pub fn build_workspaces_query(limit: u32, state: State) -> Result<String, ArgumentError> {
    let args = Arguments::new()
        .raw("limit", check_range("limit", limit, 1, 100)?)
        .raw("state", state);
    let fields = Selection::new(["id", "name", "kind", "description", "state"]);
    Ok(format!("query {{ workspaces{args} {fields} }}"))
}

impl MondayClient {
    /// Lists workspaces in the given state.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError`] on invalid arguments or a failed request.
    #[instrument(skip(self))]
    pub async fn get_workspaces(
        &self,
        limit: u32,
        state: State,
    ) -> Result<Vec<Workspace>, MondayError> {
        #[derive(Deserialize)]
        struct Response {
            #[serde(default, deserialize_with = "de::nullable")]
            workspaces: Vec<Workspace>,
        }

        let context = "get_workspaces";
        let query = build_workspaces_query(limit, state)
            .map_err(|e| MondayError::invalid_argument(context, e))?;
        let response: Response = self.run(context, &query).await?;
        if response.workspaces.is_empty() {
            tracing::warn!("No {} workspaces found", state);
        }
        Ok(response.workspaces)
    }
}
