//! Storage contract for short key mappings.

use crate::error::StorageError;
use async_trait::async_trait;
use std::collections::HashMap;

/// Capability contract implemented by every storage backend.
///
/// All methods may be called concurrently from any number of request tasks.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - Lock-guarded map, lost on restart
/// - [`crate::infrastructure::persistence::FileLinkRepository`] - Append-only JSON lines log
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Stores `url` under `key` unless the key is already present.
    ///
    /// The check and the insert happen atomically. An existing mapping is
    /// never overwritten; inserting a taken key is not an error.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the mapping was inserted
    /// - `Ok(false)` if the key already existed
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on I/O or serialization failures.
    async fn add_url(&self, key: &str, url: &str) -> Result<bool, StorageError>;

    /// Looks up the URL stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on I/O or serialization failures.
    async fn get_url(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Returns an independent copy of every stored mapping.
    ///
    /// Later inserts are not reflected in the returned map, and each entry is
    /// a complete, previously committed value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on I/O or serialization failures.
    async fn get_all(&self) -> Result<HashMap<String, String>, StorageError>;
}
