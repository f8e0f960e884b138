//! Deterministic short key derivation.
//!
//! Short keys are the first [`SHORT_KEY_LEN`] lowercase hex characters of the
//! SHA-256 digest of the original URL bytes. The same URL always maps to the
//! same key, which is what makes repeated shortening idempotent.
//!
//! Eight hex characters is a 32-bit key space, so collisions become likely
//! after tens of thousands of distinct URLs. A colliding URL silently reuses
//! the existing entry.

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest.
pub const SHORT_KEY_LEN: usize = 8;

/// Derives the short key for arbitrary content.
///
/// # Examples
///
/// ```
/// use hash_shortener::utils::hasher::short_key;
///
/// let key = short_key(b"https://example.com");
/// assert_eq!(key.len(), 8);
/// assert_eq!(key, short_key(b"https://example.com"));
/// ```
pub fn short_key(content: &[u8]) -> String {
    let digest = Sha256::digest(content);
    let mut key = hex::encode(digest);
    key.truncate(SHORT_KEY_LEN);
    key
}
