//! # Hash Shortener
//!
//! A small URL shortening service built with Axum. Short keys are derived
//! from the URL itself (first 8 hex characters of its SHA-256 digest), so the
//! same URL always maps to the same key.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Link entity and the storage contract
//! - **Application Layer** ([`application`]) - Shorten, resolve and list operations
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory and file-backed storage
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs and middleware
//!
//! ## Storage
//!
//! Without a storage path links live in process memory. With one they are
//! appended to a newline-delimited JSON log that is replayed on startup:
//!
//! ```text
//! {"uuid":1,"short_url":"e3b0c442","original_url":"https://example.com"}
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! export FILE_STORAGE_PATH="/tmp/links.json"   # Optional
//! cargo run -- -a localhost:8080 -b http://localhost:8080
//!
//! curl -X POST --data 'https://example.com' http://localhost:8080/
//! ```
//!
//! ## Configuration
//!
//! See [`config`] for the flags and environment variables.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::LinkService;
    pub use crate::domain::entities::Link;
    pub use crate::domain::repositories::LinkRepository;
    pub use crate::error::{AppError, StorageError};
    pub use crate::infrastructure::persistence::{
        FileLinkRepository, MemoryLinkRepository, RecoveryMode,
    };
    pub use crate::state::AppState;
}
