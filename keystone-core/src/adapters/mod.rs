//! Adapter implementations of the ports

pub mod memory;
pub mod rest;

pub use memory::MemoryStore;
pub use rest::{RestStore, DEFAULT_BASE_URL};
