//! Link entity representing a stored short key mapping.

/// One stored mapping of a short key to its original URL.
///
/// `sequence` is assigned at insertion time and only matters to durable
/// backends, which use it to resume numbering after a restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub sequence: i64,
    pub short_key: String,
    pub original_url: String,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(sequence: i64, short_key: String, original_url: String) -> Self {
        Self {
            sequence,
            short_key,
            original_url,
        }
    }
}
