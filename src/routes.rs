//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /`             - Shorten a URL sent as plain text
//! - `GET  /`             - Rejected with 400 (no short key)
//! - `GET  /list`         - All stored links as text
//! - `GET  /{id}`         - Short link redirect
//! - `/api/*`             - JSON API
//!
//! # Middleware
//!
//! Outermost first:
//!
//! - **Tracing** - Request spans with status and latency
//! - **Request decompression** - Gzip request bodies
//! - **Response compression** - Gzip responses when accepted
//! - **Access log** - Method, URI, status, size and duration per request

use crate::api;
use crate::api::handlers::{list_handler, missing_id_handler, redirect_handler, shorten_text_handler};
use crate::api::middleware::{access_log, compression, tracing};
use crate::state::AppState;
use axum::routing::{get, post};
use axum::{Router, middleware};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(shorten_text_handler).get(missing_id_handler))
        .route("/list", get(list_handler))
        .route("/{id}", get(redirect_handler))
        .nest("/api", api::routes::routes())
        .with_state(state)
        .layer(middleware::from_fn(access_log::layer))
        .layer(compression::response_layer())
        .layer(compression::request_layer())
        .layer(tracing::layer())
}
