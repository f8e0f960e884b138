#![allow(dead_code)]

use axum_test::TestServer;
use hash_shortener::application::services::LinkService;
use hash_shortener::domain::repositories::LinkRepository;
use hash_shortener::infrastructure::persistence::{
    FileLinkRepository, MemoryLinkRepository, RecoveryMode,
};
use hash_shortener::routes::app_router;
use hash_shortener::state::AppState;
use std::path::Path;
use std::sync::Arc;

pub const BASE_URL: &str = "http://localhost:8080";

pub fn create_test_state(repository: Arc<dyn LinkRepository>) -> AppState {
    let link_service = Arc::new(LinkService::new(repository, BASE_URL));
    AppState::new(link_service)
}

pub fn memory_state() -> AppState {
    create_test_state(Arc::new(MemoryLinkRepository::new()))
}

pub fn file_state(path: &Path) -> AppState {
    let repository = FileLinkRepository::open(path, RecoveryMode::Fail).unwrap();
    create_test_state(Arc::new(repository))
}

/// Full router, middleware included.
pub fn make_server(state: AppState) -> TestServer {
    TestServer::new(app_router(state)).unwrap()
}

/// Strips the base URL from a short URL returned by the service.
pub fn key_of(short_url: &str) -> String {
    short_url
        .strip_prefix(&format!("{}/", BASE_URL))
        .unwrap_or_else(|| panic!("unexpected short URL: {short_url}"))
        .to_string()
}
