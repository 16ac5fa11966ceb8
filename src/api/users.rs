//! Users and the `me` query.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::instrument;

use super::{de, MondayClient, MondayError};
use crate::query::{check_range, ArgumentError, Arguments, Selection};

const USER_FIELDS: [&str; 10] = [
    "id",
    "name",
    "email",
    "title",
    "enabled",
    "is_admin",
    "is_guest",
    "is_pending",
    "created_at",
    "url",
];

/// A Monday.com account user.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct User {
    /// The user id.
    #[serde(deserialize_with = "de::id")]
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Login email.
    #[serde(default)]
    pub email: Option<String>,
    /// Job title.
    #[serde(default)]
    pub title: Option<String>,
    /// Whether the account is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Whether the user is an account admin.
    #[serde(default)]
    pub is_admin: Option<bool>,
    /// Whether the user is a guest.
    #[serde(default)]
    pub is_guest: Option<bool>,
    /// Whether the invitation is still pending.
    #[serde(default)]
    pub is_pending: Option<bool>,
    /// When the user was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Profile URL.
    #[serde(default)]
    pub url: Option<String>,
}

/// A `{ id name }` reference to a user, as embedded in other records.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct UserRef {
    /// The user id.
    #[serde(deserialize_with = "de::id")]
    pub id: u64,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Which users to return.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UserKind {
    /// Every user.
    #[default]
    All,
    /// Members and viewers.
    NonGuests,
    /// Guests only.
    Guests,
    /// Users that accepted their invitation.
    NonPending,
}

impl UserKind {
    /// Returns the GraphQL enum literal.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::NonGuests => "non_guests",
            Self::Guests => "guests",
            Self::NonPending => "non_pending",
        }
    }
}

/// Parameters for [`MondayClient::get_users`].
#[derive(Clone, Debug, Default)]
pub struct UserQuery {
    /// Only these user ids.
    pub ids: Vec<u64>,
    /// Only these emails.
    pub emails: Vec<String>,
    /// Fuzzy name filter.
    pub name: Option<String>,
    /// User kind filter.
    pub kind: UserKind,
    /// Page size, 1 to 1000. Omitted when `None`.
    pub limit: Option<u32>,
    /// Page number, starting at 1. Omitted when `None`.
    pub page: Option<u32>,
    /// Sort by creation date, newest first.
    pub newest_first: bool,
}

/// Renders the `users` query.
///
/// # Errors
///
/// Returns [`ArgumentError::OutOfRange`] for a limit outside 1..=1000 or a
/// page of 0.
pub fn build_users_query(params: &UserQuery) -> Result<String, ArgumentError> {
    let limit = params
        .limit
        .map(|limit| check_range("limit", limit, 1, 1000))
        .transpose()?;
    let page = params
        .page
        .map(|page| check_range("page", page, 1, u32::MAX))
        .transpose()?;

    let mut args = Arguments::new()
        .ids("ids", &params.ids)
        .strings("emails", &params.emails)
        .string_opt("name", params.name.as_deref())
        .raw("kind", params.kind.as_str())
        .raw_opt("limit", limit)
        .raw_opt("page", page);
    if params.newest_first {
        args = args.raw("newest_first", true);
    }

    Ok(format!("query {{ users{args} {} }}", Selection::new(USER_FIELDS)))
}

/// Renders the `me` query.
#[must_use]
pub fn build_current_user_query() -> String {
    format!("query {{ me {} }}", Selection::new(USER_FIELDS))
}

impl MondayClient {
    /// Lists account users.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError`] on invalid arguments or a failed request.
    #[instrument(skip(self, params))]
    pub async fn get_users(&self, params: &UserQuery) -> Result<Vec<User>, MondayError> {
        #[derive(Deserialize)]
        struct Response {
            #[serde(default, deserialize_with = "de::nullable")]
            users: Vec<User>,
        }

        let context = "get_users";
        let query =
            build_users_query(params).map_err(|e| MondayError::invalid_argument(context, e))?;
        let response: Response = self.run(context, &query).await?;
        if response.users.is_empty() {
            tracing::warn!("No users matched the query");
        }
        Ok(response.users)
    }

    /// Returns the user that owns the API token.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError`] if the request fails or `me` is missing.
    #[instrument(skip(self))]
    pub async fn get_current_user(&self) -> Result<User, MondayError> {
        #[derive(Deserialize)]
        struct Response {
            me: Option<User>,
        }

        let context = "get_current_user";
        let response: Response = self.run(context, &build_current_user_query()).await?;
        response.me.ok_or_else(|| MondayError::MissingData {
            context: context.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_user_query() {
        let query = build_users_query(&UserQuery::default()).unwrap();
        assert!(query.starts_with("query { users(kind: all) { id name email"));
    }

    #[test]
    fn test_user_query_embeds_filters() {
        let params = UserQuery {
            ids: vec![1, 2],
            emails: vec!["a@b.co".to_string()],
            name: Some("Ann".to_string()),
            kind: UserKind::NonGuests,
            limit: Some(1000),
            page: Some(3),
            newest_first: true,
        };
        let query = build_users_query(&params).unwrap();
        assert!(query.contains(
            r#"users(ids: [1, 2], emails: ["a@b.co"], name: "Ann", kind: non_guests, limit: 1000, page: 3, newest_first: true)"#
        ));
    }

    #[test]
    fn test_user_query_rejects_limits() {
        for limit in [0, 1001] {
            let params = UserQuery {
                limit: Some(limit),
                ..Default::default()
            };
            assert!(matches!(
                build_users_query(&params),
                Err(ArgumentError::OutOfRange { name: "limit", .. })
            ));
        }
        let params = UserQuery {
            page: Some(0),
            ..Default::default()
        };
        assert!(build_users_query(&params).is_err());
    }

    #[test]
    fn test_user_deserializes_numeric_id() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 42,
            "name": "Ann",
            "email": "ann@example.com",
            "is_guest": false,
            "created_at": "2024-03-01T09:30:00Z"
        }))
        .unwrap();
        assert_eq!(user.id, 42);
        assert_eq!(user.is_guest, Some(false));
        assert!(user.created_at.is_some());
    }

    #[test]
    fn test_current_user_query() {
        assert!(build_current_user_query().starts_with("query { me { id name"));
    }
}
