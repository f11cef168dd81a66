//! DTOs for the link stats endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Link;

/// Point-in-time statistics snapshot for a link.
///
/// `access_count` is the click counter as of the read; it is not a stream.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub access_count: i64,
}

impl From<Link> for StatsResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            original_url: link.original_url,
            short_code: link.short_code,
            created_at: link.created_at,
            updated_at: link.updated_at,
            access_count: link.clicks,
        }
    }
}
