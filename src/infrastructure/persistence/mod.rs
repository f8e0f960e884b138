//! Storage backend implementations.
//!
//! Concrete implementations of [`crate::domain::repositories::LinkRepository`].
//!
//! # Repositories
//!
//! - [`MemoryLinkRepository`] - Process-local map, nothing persisted
//! - [`FileLinkRepository`] - Append-only JSON lines log with startup recovery

pub mod file_link_repository;
pub mod memory_link_repository;

pub use file_link_repository::{FileLinkRepository, RecoveryMode};
pub use memory_link_repository::MemoryLinkRepository;
