//! Link creation, resolution, listing, deletion and statistics.
//!
//! This service owns the business rules of the shortener: shorten dedup per
//! owner, short code generation with collision retry, expiration semantics on
//! the redirect path, click accounting, and the ownership check shared by
//! delete and stats.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{CreateLinkInput, Link, NewLink};
use crate::domain::repositories::{InsertOutcome, LinkRepository};
use crate::error::AppError;
use crate::utils::code_generator::generate_code;

/// Maximum short code regeneration attempts before giving up.
const MAX_CODE_ATTEMPTS: usize = 10;

/// Result of a shorten request.
///
/// Distinguishes a freshly created link from a dedup hit so the HTTP boundary
/// can answer 201 vs 200 as the API contract requires.
#[derive(Debug, Clone)]
pub enum ShortenOutcome {
    Created(Link),
    Existing(Link),
}

impl ShortenOutcome {
    pub fn link(&self) -> &Link {
        match self {
            ShortenOutcome::Created(link) | ShortenOutcome::Existing(link) => link,
        }
    }
}

/// Service implementing the link business rules.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
}

impl LinkService {
    /// Creates a new link service backed by the given repository.
    pub fn new(links: Arc<dyn LinkRepository>) -> Self {
        Self { links }
    }

    /// Shortens a URL for an owner.
    ///
    /// # Deduplication
    ///
    /// At most one link exists per `(owner, original_url)` pair. A repeated
    /// shorten returns the existing link unchanged instead of creating a
    /// duplicate.
    ///
    /// # Code generation
    ///
    /// Generates a random 7-character code and inserts. A store-level
    /// uniqueness violation on the code is treated as a signal to regenerate,
    /// up to [`MAX_CODE_ATTEMPTS`] times; the caller never sees a first
    /// collision. A violation of the `(owner, url)` constraint means a
    /// concurrent shorten won the race, in which case the winner's link is the
    /// dedup result.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if all attempts collide or on database
    /// errors.
    pub async fn create(
        &self,
        owner_id: i64,
        input: CreateLinkInput,
    ) -> Result<ShortenOutcome, AppError> {
        if let Some(existing) = self
            .links
            .find_by_owner_and_url(owner_id, input.original_url())
            .await?
        {
            return Ok(ShortenOutcome::Existing(existing));
        }

        for _ in 0..MAX_CODE_ATTEMPTS {
            let new_link = NewLink {
                owner_id,
                original_url: input.original_url().to_string(),
                short_code: generate_code(),
                expires_at: input.expires_at(),
            };

            match self.links.insert(new_link).await? {
                InsertOutcome::Inserted(link) => return Ok(ShortenOutcome::Created(link)),
                InsertOutcome::CodeTaken => continue,
                InsertOutcome::DuplicateUrl => {
                    if let Some(existing) = self
                        .links
                        .find_by_owner_and_url(owner_id, input.original_url())
                        .await?
                    {
                        return Ok(ShortenOutcome::Existing(existing));
                    }
                    // Winner vanished before we could read it; regenerate and retry.
                }
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Resolves a short code to its redirect destination.
    ///
    /// Increments the click counter atomically and persists it *before*
    /// returning the destination, so every successful redirect is counted.
    /// Expired links are reported distinctly from unknown ones and do not
    /// count a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown.
    /// Returns [`AppError::Gone`] if the link has expired.
    pub async fn resolve(&self, short_code: &str) -> Result<String, AppError> {
        let link = self
            .links
            .find_by_code(short_code)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Short URL not found", json!({ "code": short_code }))
            })?;

        if link.is_expired() {
            return Err(AppError::gone(
                "Short URL has expired",
                json!({ "code": short_code }),
            ));
        }

        if !self.links.increment_clicks(link.id).await? {
            // Deleted between lookup and increment.
            return Err(AppError::not_found(
                "Short URL not found",
                json!({ "code": short_code }),
            ));
        }

        Ok(link.original_url)
    }

    /// Lists all links owned by an account, most recently created first.
    pub async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        self.links.list_by_owner(owner_id).await
    }

    /// Permanently deletes a link after checking ownership.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link doesn't exist.
    /// Returns [`AppError::Forbidden`] if `owner_id` doesn't own the link.
    pub async fn delete(&self, owner_id: i64, link_id: i64) -> Result<(), AppError> {
        let link = self.get_owned_link(owner_id, link_id).await?;

        if !self.links.delete(link.id).await? {
            return Err(AppError::not_found(
                "URL not found",
                json!({ "id": link_id }),
            ));
        }

        Ok(())
    }

    /// Returns a point-in-time snapshot of a link for its stats report.
    ///
    /// Same ownership check as [`Self::delete`].
    pub async fn stats(&self, owner_id: i64, link_id: i64) -> Result<Link, AppError> {
        self.get_owned_link(owner_id, link_id).await
    }

    /// Looks up a link by id and applies the ownership check.
    async fn get_owned_link(&self, owner_id: i64, link_id: i64) -> Result<Link, AppError> {
        let link = self.links.find_by_id(link_id).await?.ok_or_else(|| {
            AppError::not_found("URL not found", json!({ "id": link_id }))
        })?;

        authorize(&link, owner_id)?;

        Ok(link)
    }
}

/// Ownership predicate shared by delete and stats.
///
/// Kept distinct from "not found" so authorization failures stay observable at
/// the service layer.
fn authorize(link: &Link, owner_id: i64) -> Result<(), AppError> {
    if link.owner_id != owner_id {
        return Err(AppError::forbidden(
            "You are not allowed to access this URL",
            json!({ "id": link.id }),
        ));
    }

    Ok(())
}
