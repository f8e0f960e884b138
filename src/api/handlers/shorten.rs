//! Handlers for link shortening endpoints.

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a URL sent as the raw request body.
///
/// # Endpoint
///
/// `POST /`
///
/// # Request Body
///
/// ```text
/// https://example.com
/// ```
///
/// # Response
///
/// `201 Created` with the short URL as plain text:
///
/// ```text
/// http://localhost:8080/100680ad
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is empty or the URL is invalid.
/// Returns 413 Payload Too Large if the body exceeds the size limit.
/// Returns 500 Internal Server Error if the body cannot be read or stored.
pub async fn shorten_text_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = read_body(body)?;

    let long_url = String::from_utf8(body.to_vec())
        .map_err(|_| AppError::bad_request("Body must be valid UTF-8"))?;

    let key = state.link_service.shorten(&long_url).await?;

    Ok((
        StatusCode::CREATED,
        [(header::CONTENT_TYPE, "text/plain")],
        state.link_service.short_url(&key),
    ))
}

/// Shortens a URL sent as JSON.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// `201 Created`:
///
/// ```json
/// { "result": "http://localhost:8080/100680ad" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is empty, is not valid JSON, or the URL is invalid.
/// Returns 413 Payload Too Large if the body exceeds the size limit.
/// Returns 500 Internal Server Error if the body cannot be read or stored.
pub async fn shorten_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = read_body(body)?;

    let payload: ShortenRequest =
        serde_json::from_slice(&body).map_err(|e| AppError::bad_request(e.to_string()))?;

    let key = state.link_service.shorten(&payload.url).await?;

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            result: state.link_service.short_url(&key),
        }),
    ))
}

/// Unwraps the buffered body, rejecting empty ones.
///
/// Bodies over the size limit keep their `413`. Any other buffering failure,
/// such as a gzip body that cannot be decompressed, is a server error.
fn read_body(body: Result<Bytes, BytesRejection>) -> Result<Bytes, AppError> {
    let body = body.map_err(|rejection| match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::payload_too_large(rejection.body_text()),
        _ => AppError::internal(rejection.body_text()),
    })?;

    if body.is_empty() {
        return Err(AppError::bad_request("Empty body"));
    }

    Ok(body)
}
