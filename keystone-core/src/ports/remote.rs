//! Remote store port
//!
//! Defines the interface to the remote REST service that owns persistent
//! storage. Payloads are raw JSON values keyed by entity kind; the typed
//! [`SyncClient`](crate::services::SyncClient) facade handles conversion.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::domain::result::Result;
use crate::domain::EntityKind;

/// Remote store trait
///
/// One method per REST operation. Calls are independent and not
/// transactional with each other; no operation retries automatically.
/// Implementations map transport and HTTP failures into
/// [`Error::Transport`](crate::domain::result::Error).
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch the full ordered collection for a kind
    async fn list(&self, kind: EntityKind) -> Result<Vec<JsonValue>>;

    /// Submit a new record (no identifier); returns the server-assigned
    /// record including its generated identifier
    async fn create(&self, kind: EntityKind, record: JsonValue) -> Result<JsonValue>;

    /// Full replacement of an existing record, keyed by identifier
    async fn update(&self, kind: EntityKind, id: &str, record: JsonValue) -> Result<JsonValue>;

    /// Delete the record keyed by the kind's delete field
    /// (email for users - legacy route - and identifier for roles)
    async fn delete(&self, kind: EntityKind, key: &str) -> Result<()>;
}
