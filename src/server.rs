//! HTTP server initialization and runtime setup.
//!
//! Handles storage backend selection, startup recovery and the Axum server
//! lifecycle.

use crate::application::services::LinkService;
use crate::config::Config;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::persistence::{FileLinkRepository, MemoryLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use std::sync::Arc;

/// Opens the storage backend selected by `config`.
///
/// With a file path configured the log is opened (created if missing) and
/// recovered before the server accepts any request.
///
/// # Errors
///
/// Returns an error if the storage file cannot be opened, or if it holds a
/// corrupt record and the recovery mode is `fail`.
pub fn open_repository(config: &Config) -> Result<Arc<dyn LinkRepository>> {
    match &config.file_storage_path {
        Some(path) => {
            let repository = FileLinkRepository::open(path, config.recovery_mode)
                .with_context(|| format!("Failed to open storage file {}", path.display()))?;

            tracing::info!(
                "File storage ready: {} (last sequence {})",
                repository.path().display(),
                repository.last_sequence()?
            );

            Ok(Arc::new(repository))
        }
        None => {
            tracing::info!("Using in-memory storage");
            Ok(Arc::new(MemoryLinkRepository::new()))
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage backend (file or memory)
/// - Link service
/// - Axum HTTP server with graceful shutdown on Ctrl-C
///
/// # Errors
///
/// Returns an error if:
/// - Storage cannot be opened or recovered
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = open_repository(&config)?;

    let link_service = Arc::new(LinkService::new(repository, config.base_url.clone()));
    let state = AppState::new(link_service);

    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
