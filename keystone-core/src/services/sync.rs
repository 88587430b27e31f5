//! Sync client - typed CRUD operations against the remote store
//!
//! A thin facade over the [`RemoteStore`] port that handles serde conversion
//! for one entity kind. No operation retries automatically and no timeout is
//! enforced beyond the transport default.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::Entity;
use crate::ports::RemoteStore;

/// Typed sync client for one entity kind
pub struct SyncClient<E: Entity> {
    remote: Arc<dyn RemoteStore>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Clone for SyncClient<E> {
    fn clone(&self) -> Self {
        Self {
            remote: Arc::clone(&self.remote),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> SyncClient<E> {
    pub fn new(remote: Arc<dyn RemoteStore>) -> Self {
        Self {
            remote,
            _entity: PhantomData,
        }
    }

    /// Fetch the full ordered collection
    pub async fn list(&self) -> Result<Vec<E>> {
        let raw = self.remote.list(E::KIND).await?;
        raw.into_iter()
            .map(|value| serde_json::from_value(value).map_err(Error::from))
            .collect()
    }

    /// Submit a new record; returns the server-assigned record
    pub async fn create(&self, record: &E) -> Result<E> {
        let payload = serde_json::to_value(record)?;
        let created = self.remote.create(E::KIND, payload).await?;
        Ok(serde_json::from_value(created)?)
    }

    /// Submit a full replacement of an existing record
    pub async fn update(&self, id: &str, record: &E) -> Result<E> {
        let payload = serde_json::to_value(record)?;
        let updated = self.remote.update(E::KIND, id, payload).await?;
        Ok(serde_json::from_value(updated)?)
    }

    /// Delete the record for the kind's delete key
    pub async fn delete(&self, key: &str) -> Result<()> {
        self.remote.delete(E::KIND, key).await
    }
}
