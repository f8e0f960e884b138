//! Per-request access log.

use axum::{
    extract::Request,
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use axum::body::HttpBody as _;
use std::time::Instant;

/// Logs method, URI, status, response size and duration once the handler is done.
///
/// Installed inside the compression layer, so the logged size is the
/// uncompressed body the handler produced.
///
/// # Example Logs
///
/// ```text
/// INFO access: uri=/ method=POST status=201 size=30 duration_ms=0
/// ```
pub async fn layer(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;

    let size = response
        .body()
        .size_hint()
        .exact()
        .or_else(|| content_length(response.headers()));

    tracing::info!(
        target: "access",
        uri = %uri,
        method = %method,
        status = response.status().as_u16(),
        size = size.unwrap_or(0),
        duration_ms = start.elapsed().as_millis() as u64,
    );

    response
}

fn content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}
