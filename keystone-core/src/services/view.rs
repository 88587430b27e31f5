//! Entity view - page-level controller for one kind
//!
//! Owns the store, the sync client, and the single edit session for a view.
//! Mirrors the lifecycle of a management page: load the collection on
//! mount, open/submit/cancel the edit dialog, delete on request.

use tracing::warn;

use crate::domain::result::Error;
use crate::domain::Entity;
use crate::services::session::{EditSession, Notification, SubmitOutcome};
use crate::services::store::EntityStore;
use crate::services::sync::SyncClient;

/// Result of a delete attempt
#[derive(Debug)]
pub enum DeleteOutcome {
    Removed { notice: Notification },
    /// The store is untouched on failure
    Failed { error: Error, notice: Notification },
}

impl DeleteOutcome {
    pub fn notification(&self) -> &Notification {
        match self {
            DeleteOutcome::Removed { notice } | DeleteOutcome::Failed { notice, .. } => notice,
        }
    }
}

/// Page-level controller for one entity kind
pub struct EntityView<E: Entity> {
    client: SyncClient<E>,
    store: EntityStore<E>,
    session: EditSession<E>,
}

impl<E: Entity> EntityView<E> {
    pub fn new(client: SyncClient<E>) -> Self {
        Self {
            client,
            store: EntityStore::new(),
            session: EditSession::new(),
        }
    }

    pub fn store(&self) -> &EntityStore<E> {
        &self.store
    }

    pub fn records(&self) -> &[E] {
        self.store.records()
    }

    pub fn session(&self) -> &EditSession<E> {
        &self.session
    }

    /// Record with the given identifier, if loaded
    pub fn find(&self, id: &str) -> Option<&E> {
        self.store.get(id)
    }

    /// Load the collection from the remote service.
    ///
    /// A list failure degrades to an empty collection with a logged
    /// diagnostic; it only affects initial population and is not surfaced
    /// as a user-facing notification.
    pub async fn load(&mut self) {
        match self.client.list().await {
            Ok(records) => self.store.replace_all(records),
            Err(error) => {
                warn!(
                    kind = E::KIND.label(),
                    %error,
                    "failed to load collection; showing empty"
                );
                self.store.replace_all(Vec::new());
            }
        }
    }

    /// Open the edit dialog on a blank draft
    pub fn open_blank(&mut self) -> crate::domain::result::Result<()> {
        self.session.open(None)
    }

    /// Open the edit dialog prefilled from an existing record
    pub fn open_existing(&mut self, record: E) -> crate::domain::result::Result<()> {
        self.session.open(Some(record))
    }

    pub fn draft_mut(&mut self) -> Option<&mut E::Draft> {
        self.session.draft_mut()
    }

    pub fn cancel(&mut self) {
        self.session.cancel();
    }

    /// Submit the open session's draft
    pub async fn submit(&mut self) -> SubmitOutcome<E> {
        self.session.submit(&self.client, &mut self.store).await
    }

    /// Delete the record for the kind's delete key and, on success, remove
    /// it from the store
    pub async fn delete(&mut self, key: &str) -> DeleteOutcome {
        match self.client.delete(key).await {
            Ok(()) => {
                self.store.remove(key);
                DeleteOutcome::Removed {
                    notice: Notification::success(format!(
                        "{} deleted successfully!",
                        E::KIND.title()
                    )),
                }
            }
            Err(error) => DeleteOutcome::Failed {
                error,
                notice: Notification::failure(format!("Failed to delete {}", E::KIND.label())),
            },
        }
    }
}
