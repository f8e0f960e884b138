//! Handler for listing stored links.

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Lists every stored link.
///
/// # Endpoint
///
/// `GET /list`
///
/// # Response
///
/// `200 OK`, one `key -> url` line per link, ordered by key:
///
/// ```text
/// 100680ad -> https://example.com
/// 8b1a9953 -> https://rust-lang.org
/// ```
///
/// # Errors
///
/// Returns 500 Internal Server Error on storage errors.
pub async fn list_handler(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let links = state.link_service.list().await?;

    let body: String = links
        .iter()
        .map(|(key, url)| format!("{} -> {}\n", key, url))
        .collect();

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "text/plain")], body))
}
