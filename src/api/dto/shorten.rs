//! DTOs for the JSON shortening endpoint.

use serde::{Deserialize, Serialize};

/// Request to shorten a single URL.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
}

/// Full short URL for the submitted link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub result: String,
}
