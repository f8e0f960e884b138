//! In-memory implementation of link repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::RwLock;

use crate::domain::repositories::LinkRepository;
use crate::error::StorageError;

/// Link storage held in a single map behind a reader/writer lock.
///
/// Lookups and snapshots share the lock; inserts take it exclusively.
/// Nothing is persisted, so every mapping is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryLinkRepository {
    links: RwLock<HashMap<String, String>>,
}

impl MemoryLinkRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn add_url(&self, key: &str, url: &str) -> Result<bool, StorageError> {
        let mut links = self.links.write().map_err(|_| StorageError::LockPoisoned)?;

        match links.entry(key.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(url.to_string());
                Ok(true)
            }
        }
    }

    async fn get_url(&self, key: &str) -> Result<Option<String>, StorageError> {
        let links = self.links.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(links.get(key).cloned())
    }

    async fn get_all(&self) -> Result<HashMap<String, String>, StorageError> {
        let links = self.links.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(links.clone())
    }
}
