//! Keystone Core - client engine for the RBAC admin console
//!
//! This crate implements the console's core logic following hexagonal
//! architecture:
//!
//! - **domain**: Entities and validation (User, Role, Permissions, drafts)
//! - **ports**: Trait definitions for external dependencies (RemoteStore)
//! - **services**: CRUD synchronization, edit sessions, dashboard aggregation
//! - **adapters**: Concrete implementations (REST service, in-memory demo)
//!
//! The remote REST service owns persistent storage; this crate holds no
//! durable state beyond the in-memory view of the last server response.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::sync::Arc;

use adapters::{MemoryStore, RestStore};
use config::Config;
use ports::RemoteStore;
use services::{Dashboard, DashboardSummary, EntityView, SyncClient};

// Re-export commonly used types at crate root
pub use domain::result::{Error, Result};
pub use domain::{Entity, EntityKind, Permissions, Role, RoleDraft, User, UserDraft, ValidationErrors};
pub use services::{
    DeleteOutcome, EditSession, EntityStore, Notification, SessionState, Severity, SubmitOutcome,
};

/// Main context for console operations
///
/// This is the primary entry point. It wires the configured remote adapter
/// into one view per entity kind and derives the dashboard summary from
/// their snapshots.
pub struct KeystoneContext {
    pub config: Config,
    pub users: EntityView<User>,
    pub roles: EntityView<Role>,
    dashboard: Dashboard,
}

impl KeystoneContext {
    /// Create a context from config: demo mode runs against seeded
    /// in-memory data, otherwise the REST adapter targets the configured
    /// base URL
    pub fn new(config: Config) -> Result<Self> {
        let remote: Arc<dyn RemoteStore> = if config.demo_mode {
            Arc::new(MemoryStore::with_sample_data())
        } else {
            Arc::new(RestStore::new(&config.base_url)?)
        };
        Ok(Self::with_remote(config, remote))
    }

    /// Create a context over an explicit remote adapter
    pub fn with_remote(config: Config, remote: Arc<dyn RemoteStore>) -> Self {
        Self {
            users: EntityView::new(SyncClient::new(Arc::clone(&remote))),
            roles: EntityView::new(SyncClient::new(remote)),
            dashboard: Dashboard::new(),
            config,
        }
    }

    /// Load both collections from the remote service
    pub async fn load_all(&mut self) {
        self.users.load().await;
        self.roles.load().await;
    }

    /// Current dashboard summary, recomputed when either snapshot changed
    pub fn dashboard(&mut self) -> DashboardSummary {
        self.dashboard.refresh(self.users.store(), self.roles.store())
    }
}
