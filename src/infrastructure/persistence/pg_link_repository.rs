//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{InsertOutcome, LinkRepository};
use crate::error::AppError;

/// Constraint names from `migrations/0002_create_links.sql`.
const SHORT_CODE_CONSTRAINT: &str = "links_short_code_key";
const OWNER_URL_CONSTRAINT: &str = "links_owner_id_original_url_key";

/// PostgreSQL repository for link storage and retrieval.
///
/// The click increment is a single `UPDATE ... SET clicks = clicks + 1`, so
/// concurrent redirects never lose counts to a read-modify-write interleave.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<InsertOutcome, AppError> {
        let result = sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links (owner_id, original_url, short_code, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, owner_id, original_url, short_code, clicks, expires_at, created_at, updated_at
            "#,
        )
        .bind(new_link.owner_id)
        .bind(&new_link.original_url)
        .bind(&new_link.short_code)
        .bind(new_link.expires_at)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(link) => Ok(InsertOutcome::Inserted(link)),
            Err(e) => {
                if let Some(db) = e.as_database_error()
                    && db.is_unique_violation()
                {
                    return match db.constraint() {
                        Some(SHORT_CODE_CONSTRAINT) => Ok(InsertOutcome::CodeTaken),
                        Some(OWNER_URL_CONSTRAINT) => Ok(InsertOutcome::DuplicateUrl),
                        _ => Err(e.into()),
                    };
                }
                Err(e.into())
            }
        }
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, owner_id, original_url, short_code, clicks, expires_at, created_at, updated_at
            FROM links
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, owner_id, original_url, short_code, clicks, expires_at, created_at, updated_at
            FROM links
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_by_owner_and_url(
        &self,
        owner_id: i64,
        original_url: &str,
    ) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, owner_id, original_url, short_code, clicks, expires_at, created_at, updated_at
            FROM links
            WHERE owner_id = $1 AND original_url = $2
            "#,
        )
        .bind(owner_id)
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        let links = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, owner_id, original_url, short_code, clicks, expires_at, created_at, updated_at
            FROM links
            WHERE owner_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }

    async fn increment_clicks(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET clicks = clicks + 1, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
