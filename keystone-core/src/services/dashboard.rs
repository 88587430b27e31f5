//! Dashboard aggregation - summary counts over the current snapshots

use serde::Serialize;

use crate::domain::{Role, User};
use crate::services::store::EntityStore;

/// Summary figures shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    /// Number of users in the last-synchronized collection
    pub user_count: usize,
    /// Number of roles in the last-synchronized collection
    pub role_count: usize,
    /// Total granted permission flags across all roles (0-3 per role)
    pub permission_count: usize,
}

/// Compute summary figures from the current store snapshots
pub fn summarize(users: &EntityStore<User>, roles: &EntityStore<Role>) -> DashboardSummary {
    DashboardSummary {
        user_count: users.len(),
        role_count: roles.len(),
        permission_count: roles
            .records()
            .iter()
            .map(|role| role.permissions.granted_count())
            .sum(),
    }
}

/// Dashboard with snapshot-keyed recompute
///
/// Caches the last summary against the pair of store revisions and
/// recomputes only when either snapshot changed. Recompute is linear in
/// role count, so this is bookkeeping rather than an optimization.
#[derive(Debug, Default)]
pub struct Dashboard {
    seen: Option<(u64, u64)>,
    summary: DashboardSummary,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refresh(
        &mut self,
        users: &EntityStore<User>,
        roles: &EntityStore<Role>,
    ) -> DashboardSummary {
        let revisions = (users.revision(), roles.revision());
        if self.seen != Some(revisions) {
            self.summary = summarize(users, roles);
            self.seen = Some(revisions);
        }
        self.summary
    }
}
