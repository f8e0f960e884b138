//! Link creation, resolution and listing service.

use std::sync::Arc;

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::hasher::short_key;
use crate::utils::url_validator::validate_url;

/// Service for shortening and resolving links.
///
/// Validation, key derivation and insertion live here so handlers only deal
/// with HTTP concerns. The repository is injected, which lets tests and the
/// server pick a backend independently.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// A trailing `/` on `base_url` is dropped so short URLs never contain `//`.
    pub fn new(repository: Arc<dyn LinkRepository>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            repository,
            base_url,
        }
    }

    /// Shortens `long_url` and returns its short key.
    ///
    /// The key is derived from the URL itself, so shortening the same URL
    /// twice yields the same key and leaves the stored mapping untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is rejected.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn shorten(&self, long_url: &str) -> Result<String, AppError> {
        validate_url(long_url)?;

        let key = short_key(long_url.as_bytes());

        if self.repository.add_url(&key, long_url).await? {
            tracing::info!("URL added: url={}; hash={}", long_url, key);
        } else {
            tracing::info!("URL already exists: url={}; hash={}", long_url, key);
        }

        Ok(key)
    }

    /// Resolves a short key to the original URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link is stored under `key`.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve(&self, key: &str) -> Result<String, AppError> {
        self.repository
            .get_url(key)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Short URL not found: {}", key)))
    }

    /// Returns every stored link as `(key, url)` pairs ordered by key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list(&self) -> Result<Vec<(String, String)>, AppError> {
        let mut links: Vec<_> = self.repository.get_all().await?.into_iter().collect();
        links.sort_unstable();
        Ok(links)
    }

    /// Builds the public short URL for a key.
    pub fn short_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}
