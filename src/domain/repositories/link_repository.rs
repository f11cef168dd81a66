//! Repository trait for link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Outcome of an insert attempt against the link store.
///
/// The store enforces two unique constraints; each violation is surfaced as a
/// distinct outcome so the service can react (regenerate the code, or resolve
/// a lost dedup race) instead of failing the request.
#[derive(Debug, Clone)]
pub enum InsertOutcome {
    /// The link was inserted.
    Inserted(Link),
    /// The generated short code is already taken by another link.
    CodeTaken,
    /// The owner already has a link for this URL (concurrent shorten race).
    DuplicateUrl,
}

/// Repository interface for managing short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - In-memory implementation in `tests/common` for handler tests
/// - Mocks auto-generated with `cfg(test)` for service unit tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link with `clicks = 0`.
    ///
    /// Unique constraint violations are reported via [`InsertOutcome`], not as
    /// errors.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert(&self, new_link: NewLink) -> Result<InsertOutcome, AppError>;

    /// Finds a link by its globally unique short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by its id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Finds the link an owner already created for a given URL.
    ///
    /// Used by the shorten dedup check.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_owner_and_url(
        &self,
        owner_id: i64,
        original_url: &str,
    ) -> Result<Option<Link>, AppError>;

    /// Lists all links for an owner, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError>;

    /// Atomically increments the click counter of a link by 1.
    ///
    /// Returns `Ok(false)` when no link with this id exists (e.g. deleted
    /// between lookup and increment).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_clicks(&self, id: i64) -> Result<bool, AppError>;

    /// Permanently deletes a link by id.
    ///
    /// Returns `Ok(false)` when no link with this id exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
