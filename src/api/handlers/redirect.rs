//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short key to its original URL.
///
/// # Endpoint
///
/// `GET /{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the key is unknown.
/// Returns 500 Internal Server Error on storage errors.
pub async fn redirect_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Resolving short URL: {}", id);

    let long_url = state.link_service.resolve(&id).await?;

    Ok(Redirect::temporary(&long_url))
}

/// Rejects `GET /`, which carries no short key.
pub async fn missing_id_handler() -> StatusCode {
    StatusCode::BAD_REQUEST
}
