//! Edit session - lifecycle of a single create-or-edit operation
//!
//! A session opens on a blank or prefilled draft, validates it, submits it
//! through the sync client, and closes on success. Validation or submit
//! failure keeps the session open with the draft intact so the user can
//! retry or cancel. At most one session per view is ever non-closed.

use crate::domain::result::{Error, Result};
use crate::domain::{Entity, ValidationErrors};
use crate::services::store::EntityStore;
use crate::services::sync::SyncClient;

/// Lifecycle states of an edit session
///
/// The "failed" condition from validation or submission is not a separate
/// state: the session returns to `Open` with its errors surfaced and the
/// draft retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Open,
    /// A submission is in flight; re-entrant submits are no-ops
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Failure,
}

/// A user-facing notice the core has decided is due.
/// How it is rendered is the front-end's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Failure,
            message: message.into(),
        }
    }
}

/// Result of a submit attempt
#[derive(Debug)]
pub enum SubmitOutcome<E> {
    /// The server accepted the record; the session closed and the store
    /// was updated
    Saved { record: E, notice: Notification },
    /// The draft failed validation; no network call was made and the
    /// session stays open
    Invalid { errors: ValidationErrors },
    /// The server rejected the record or was unreachable; the session
    /// stays open with the draft retained
    Failed { error: Error, notice: Notification },
    /// A submission was already in flight; this call did nothing
    InFlight,
    /// No session is open
    NotOpen,
}

impl<E> SubmitOutcome<E> {
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            SubmitOutcome::Saved { notice, .. } | SubmitOutcome::Failed { notice, .. } => {
                Some(notice)
            }
            _ => None,
        }
    }
}

/// A single create-or-edit dialog lifecycle
#[derive(Debug)]
pub struct EditSession<E: Entity> {
    state: SessionState,
    original: Option<E>,
    draft: Option<E::Draft>,
    errors: ValidationErrors,
}

impl<E: Entity> EditSession<E> {
    pub fn new() -> Self {
        Self {
            state: SessionState::Closed,
            original: None,
            draft: None,
            errors: ValidationErrors::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != SessionState::Closed
    }

    /// Whether the session was opened on an existing record
    pub fn is_editing(&self) -> bool {
        self.original.is_some()
    }

    pub fn draft(&self) -> Option<&E::Draft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut E::Draft> {
        self.draft.as_mut()
    }

    /// Violations surfaced by the last submit attempt
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Open the session on an existing record (edit) or a blank draft
    /// (create). Only one session may be open at a time.
    pub fn open(&mut self, existing: Option<E>) -> Result<()> {
        if self.state != SessionState::Closed {
            return Err(Error::session("an edit session is already open"));
        }
        self.draft = Some(match &existing {
            Some(record) => record.to_draft(),
            None => E::blank_draft(),
        });
        self.original = existing;
        self.errors = ValidationErrors::new();
        self.state = SessionState::Open;
        Ok(())
    }

    /// Close the session, discarding the draft without side effects
    pub fn cancel(&mut self) {
        self.close();
    }

    /// Validate the draft and, if clean, submit it through the sync client.
    ///
    /// On success the server-returned record is upserted into the store and
    /// the session closes. On failure the store is untouched and the session
    /// stays open with the draft retained.
    pub async fn submit(
        &mut self,
        client: &SyncClient<E>,
        store: &mut EntityStore<E>,
    ) -> SubmitOutcome<E> {
        match self.state {
            SessionState::Closed => return SubmitOutcome::NotOpen,
            SessionState::Submitting => return SubmitOutcome::InFlight,
            SessionState::Open => {}
        }
        let draft = match &self.draft {
            Some(draft) => draft.clone(),
            None => return SubmitOutcome::NotOpen,
        };

        let errors = E::validate(&draft);
        if !errors.is_empty() {
            self.errors = errors.clone();
            return SubmitOutcome::Invalid { errors };
        }
        self.errors = ValidationErrors::new();

        let editing = self.original.is_some();
        self.state = SessionState::Submitting;
        let result = match &self.original {
            Some(original) => match original.id() {
                Some(id) => client.update(id, &original.merged_with(&draft)).await,
                None => Err(Error::session("record under edit has no identifier")),
            },
            None => client.create(&E::from_draft(&draft)).await,
        };

        match result {
            Ok(saved) => {
                store.upsert(saved.clone());
                self.close();
                let verb = if editing { "updated" } else { "added" };
                SubmitOutcome::Saved {
                    record: saved,
                    notice: Notification::success(format!(
                        "{} {} successfully!",
                        E::KIND.title(),
                        verb
                    )),
                }
            }
            Err(error) => {
                // Back to Open: the draft survives for retry or cancel
                self.state = SessionState::Open;
                let verb = if editing { "update" } else { "add" };
                SubmitOutcome::Failed {
                    error,
                    notice: Notification::failure(format!(
                        "Failed to {} {}",
                        verb,
                        E::KIND.label()
                    )),
                }
            }
        }
    }

    fn close(&mut self) {
        self.state = SessionState::Closed;
        self.original = None;
        self.draft = None;
        self.errors = ValidationErrors::new();
    }
}

impl<E: Entity> Default for EditSession<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapters::MemoryStore;
    use crate::domain::{Permissions, Role, RoleDraft, User};

    fn role_fixture() -> (Arc<MemoryStore>, SyncClient<Role>, EntityStore<Role>) {
        let remote = Arc::new(MemoryStore::new());
        let client = SyncClient::new(Arc::clone(&remote) as Arc<dyn crate::ports::RemoteStore>);
        (remote, client, EntityStore::new())
    }

    #[tokio::test]
    async fn test_short_role_name_blocks_network_call() {
        let (remote, client, mut store) = role_fixture();
        let mut session: EditSession<Role> = EditSession::new();
        session.open(None).unwrap();
        if let Some(draft) = session.draft_mut() {
            draft.name = "Ed".to_string();
            draft.permissions = Some(Permissions {
                read: true,
                write: false,
                delete: false,
            });
        }

        let outcome = session.submit(&client, &mut store).await;
        match outcome {
            SubmitOutcome::Invalid { errors } => {
                assert_eq!(
                    errors.get("name"),
                    Some("Role name must be at least 3 characters long")
                );
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
        // Session stays open, errors surfaced, nothing hit the remote
        assert_eq!(session.state(), SessionState::Open);
        assert!(!session.errors().is_empty());
        assert_eq!(remote.request_count(), 0);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_create_closes_session_and_upserts() {
        let (_remote, client, mut store) = role_fixture();
        let mut session: EditSession<Role> = EditSession::new();
        session.open(None).unwrap();
        if let Some(draft) = session.draft_mut() {
            draft.name = "Editor".to_string();
        }

        let outcome = session.submit(&client, &mut store).await;
        match outcome {
            SubmitOutcome::Saved { record, notice } => {
                assert_eq!(record.id.as_deref(), Some("1"));
                assert_eq!(notice.message, "Role added successfully!");
                assert_eq!(notice.severity, Severity::Success);
            }
            other => panic!("expected Saved, got {:?}", other),
        }
        assert_eq!(session.state(), SessionState::Closed);
        assert!(session.draft().is_none());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_draft_for_retry() {
        let (remote, client, mut store) = role_fixture();
        let mut session: EditSession<Role> = EditSession::new();
        session.open(None).unwrap();
        if let Some(draft) = session.draft_mut() {
            draft.name = "Editor".to_string();
        }

        remote.set_failing(true);
        let outcome = session.submit(&client, &mut store).await;
        match outcome {
            SubmitOutcome::Failed { notice, .. } => {
                assert_eq!(notice.message, "Failed to add role");
            }
            other => panic!("expected Failed, got {:?}", other),
        }
        assert_eq!(session.state(), SessionState::Open);
        assert_eq!(session.draft().map(|d| d.name.as_str()), Some("Editor"));
        assert!(store.is_empty());

        // The retained draft succeeds once the remote recovers
        remote.set_failing(false);
        let outcome = session.submit(&client, &mut store).await;
        assert!(matches!(outcome, SubmitOutcome::Saved { .. }));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_edit_submits_full_merged_record() {
        let remote = Arc::new(MemoryStore::new());
        let client: SyncClient<User> =
            SyncClient::new(Arc::clone(&remote) as Arc<dyn crate::ports::RemoteStore>);
        let mut store = EntityStore::new();

        let created = client
            .create(&User {
                id: None,
                name: "Al Smith".to_string(),
                email: "a@x.com".to_string(),
                role: "Admin".to_string(),
                status: true,
            })
            .await
            .unwrap();
        store.upsert(created.clone());

        let mut session: EditSession<User> = EditSession::new();
        session.open(Some(created)).unwrap();
        assert!(session.is_editing());
        if let Some(draft) = session.draft_mut() {
            draft.status = false;
        }

        let outcome = session.submit(&client, &mut store).await;
        match outcome {
            SubmitOutcome::Saved { record, notice } => {
                assert_eq!(record.id.as_deref(), Some("1"));
                assert!(!record.status);
                // Fields not touched by the edit are preserved
                assert_eq!(record.email, "a@x.com");
                assert_eq!(notice.message, "User updated successfully!");
            }
            other => panic!("expected Saved, got {:?}", other),
        }
        assert_eq!(store.len(), 1);
        assert!(!store.get("1").unwrap().status);
    }

    #[tokio::test]
    async fn test_cancel_discards_draft() {
        let (remote, _client, _store) = role_fixture();
        let mut session: EditSession<Role> = EditSession::new();
        session.open(None).unwrap();
        if let Some(draft) = session.draft_mut() {
            draft.name = "Scratch".to_string();
        }
        session.cancel();
        assert_eq!(session.state(), SessionState::Closed);
        assert!(session.draft().is_none());
        assert_eq!(remote.request_count(), 0);
    }

    #[tokio::test]
    async fn test_only_one_session_open_at_a_time() {
        let mut session: EditSession<Role> = EditSession::new();
        session.open(None).unwrap();
        assert!(session.open(None).is_err());
        session.cancel();
        assert!(session.open(None).is_ok());
    }

    #[tokio::test]
    async fn test_submit_without_open_session_is_not_open() {
        let (remote, client, mut store) = role_fixture();
        let mut session: EditSession<Role> = EditSession::new();
        let outcome = session.submit(&client, &mut store).await;
        assert!(matches!(outcome, SubmitOutcome::NotOpen));
        assert_eq!(remote.request_count(), 0);
    }

    #[test]
    fn test_blank_role_draft_opens_with_default_flags() {
        let mut session: EditSession<Role> = EditSession::new();
        session.open(None).unwrap();
        let draft: &RoleDraft = session.draft().unwrap();
        assert_eq!(draft.permissions, Some(Permissions::default()));
    }
}
