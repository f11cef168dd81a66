//! Link entity representing a shortening mapping.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::error::AppError;

/// A shortened URL owned by an account.
///
/// `short_code` is globally unique across all links. `clicks` starts at 0 and
/// is only ever incremented by successful redirects.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub owner_id: i64,
    pub original_url: String,
    pub short_code: String,
    pub clicks: i64,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Returns true if the link has passed its expiry time.
    ///
    /// Links without `expires_at` never expire.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| e < Utc::now())
    }
}

/// Input data for inserting a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub owner_id: i64,
    pub original_url: String,
    pub short_code: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Validated input for the shorten operation.
///
/// Construction fails with [`AppError::Validation`] when the URL is empty, so
/// an instance always carries a usable destination.
#[derive(Debug, Clone)]
pub struct CreateLinkInput {
    original_url: String,
    expires_at: Option<DateTime<Utc>>,
}

impl CreateLinkInput {
    pub fn new(
        original_url: impl Into<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Self, AppError> {
        let original_url = original_url.into().trim().to_string();

        if original_url.is_empty() {
            return Err(AppError::bad_request("Original URL is required", json!({})));
        }

        Ok(Self {
            original_url,
            expires_at,
        })
    }

    pub fn original_url(&self) -> &str {
        &self.original_url
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }
}
