//! Service layer - orchestration over the domain and ports

pub mod dashboard;
pub mod session;
pub mod store;
pub mod sync;
pub mod view;

pub use dashboard::{summarize, Dashboard, DashboardSummary};
pub use session::{EditSession, Notification, SessionState, Severity, SubmitOutcome};
pub use store::EntityStore;
pub use sync::SyncClient;
pub use view::{DeleteOutcome, EntityView};
