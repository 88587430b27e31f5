//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

pub mod entity;
pub mod result;
mod role;
mod user;
pub mod validation;

pub use entity::{Entity, EntityKind};
pub use role::{Permissions, Role, RoleDraft};
pub use user::{User, UserDraft};
pub use validation::ValidationErrors;
