//! DTOs for the shorten endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to shorten a URL.
///
/// `original_url` is an `Option` so a missing field surfaces as a 400
/// validation error instead of a body deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    pub original_url: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Response when the URL was already shortened by this owner.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DedupResponse {
    pub short_code: String,
    pub message: &'static str,
}
