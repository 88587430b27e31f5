//! Entity kind and the trait shared by all managed record types
//!
//! The console manages two kinds of records (users and roles) through one
//! generic store, sync client, and edit session. This trait is the seam that
//! lets those stay kind-agnostic.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::validation::ValidationErrors;

/// The kinds of records the console manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Role,
}

impl EntityKind {
    /// Collection path segment on the remote service
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::User => "users",
            EntityKind::Role => "roles",
        }
    }

    /// Lowercase label for messages and logs
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Role => "role",
        }
    }

    /// Capitalized label for notifications
    pub fn title(&self) -> &'static str {
        match self {
            EntityKind::User => "User",
            EntityKind::Role => "Role",
        }
    }

    /// The record field the server routes deletes by.
    ///
    /// Users are deleted by email - a legacy route on the existing server.
    /// Do not switch this to "id" without confirming the server's delete
    /// route first.
    pub fn delete_field(&self) -> &'static str {
        match self {
            EntityKind::User => "email",
            EntityKind::Role => "id",
        }
    }
}

/// A record kind managed by the console
///
/// Implementations pair a server-side record with its transient client-side
/// draft and define the validation and merge rules the edit session applies.
pub trait Entity:
    Clone + std::fmt::Debug + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Transient in-progress field values for a create-or-edit dialog
    type Draft: Clone + std::fmt::Debug + Send + Sync + 'static;

    const KIND: EntityKind;

    /// Server-assigned identifier, absent before the first create round trip
    fn id(&self) -> Option<&str>;

    /// The key the server routes deletes by (see [`EntityKind::delete_field`])
    fn delete_key(&self) -> Option<&str>;

    /// Whether this record is the delete target for `key`
    fn matches_key(&self, key: &str) -> bool {
        self.delete_key() == Some(key)
    }

    /// Pure rule check; an empty map means the draft may be submitted
    fn validate(draft: &Self::Draft) -> ValidationErrors;

    /// Schema-appropriate blank draft for a create dialog
    fn blank_draft() -> Self::Draft;

    /// Draft prefilled from an existing record for an edit dialog
    fn to_draft(&self) -> Self::Draft;

    /// New record built from a draft, with no identifier
    fn from_draft(draft: &Self::Draft) -> Self;

    /// Full replacement record for an update: draft values merged onto this
    /// record so fields absent from the draft keep their prior values
    fn merged_with(&self, draft: &Self::Draft) -> Self;
}

/// Deserialize a server-assigned identifier that may arrive as a JSON
/// number or string, normalizing to a string
pub fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<JsonValue> = Option::deserialize(deserializer)?;
    match value {
        Some(JsonValue::Number(n)) => Ok(Some(n.to_string())),
        Some(JsonValue::String(s)) => Ok(Some(s)),
        Some(JsonValue::Null) | None => Ok(None),
        _ => Err(D::Error::custom("expected number or string for id")),
    }
}
