//! Reference implementations of the Fundra collaborator seams.
//!
//! - `memory` - In-memory transactional store with rollback-on-drop
//! - `cache` - Moka-backed member cache
//! - `notify` - Log-only notification dispatcher
//!
//! The integration tests for the core workflows live in this crate's
//! `tests/` directory, exercised against the in-memory store.

pub mod cache;
pub mod memory;
pub mod notify;

pub use cache::MokaMemberCache;
pub use memory::MemoryStore;
pub use notify::LogDispatcher;
