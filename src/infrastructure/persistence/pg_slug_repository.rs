//! PostgreSQL implementation of the slug repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::ShortLink;
use crate::domain::repositories::SlugRepository;
use crate::error::AppError;

/// Name of the unique constraint guarding `short_links.slug`.
const SLUG_UNIQUE_CONSTRAINT: &str = "short_links_pkey";

#[derive(sqlx::FromRow)]
struct ShortLinkRow {
    slug: String,
    url: String,
    created_at: DateTime<Utc>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        ShortLink::new(row.slug, row.url, row.created_at)
    }
}

/// PostgreSQL repository for short links.
///
/// Uses bound parameters for every query. Uniqueness is enforced by the
/// primary key on `slug`, so concurrent inserts of the same slug resolve to
/// one row and one [`AppError::DuplicateSlug`].
pub struct PgSlugRepository {
    pool: Arc<PgPool>,
}

impl PgSlugRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Maps an insert failure, turning a unique violation into `DuplicateSlug`.
fn map_insert_error(e: sqlx::Error, slug: &str) -> AppError {
    if let Some(db_err) = e.as_database_error()
        && db_err.is_unique_violation()
    {
        if db_err.constraint() != Some(SLUG_UNIQUE_CONSTRAINT) {
            tracing::warn!(
                constraint = ?db_err.constraint(),
                "Unique violation on unexpected constraint"
            );
        }
        return AppError::duplicate_slug(slug);
    }

    AppError::internal(
        "Failed to insert short link",
        json!({ "slug": slug, "reason": e.to_string() }),
    )
}

#[async_trait]
impl SlugRepository for PgSlugRepository {
    async fn exists(&self, slug: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM short_links WHERE slug = $1)")
                .bind(slug)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn create(&self, slug: &str, url: &str) -> Result<ShortLink, AppError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            INSERT INTO short_links (slug, url)
            VALUES ($1, $2)
            RETURNING slug, url, created_at
            "#,
        )
        .bind(slug)
        .bind(url)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| map_insert_error(e, slug))?;

        Ok(row.into())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            "SELECT slug, url, created_at FROM short_links WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
