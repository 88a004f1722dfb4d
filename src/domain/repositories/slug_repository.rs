//! Repository trait for short link data access.

use crate::domain::entities::ShortLink;
use crate::error::AppError;
use async_trait::async_trait;

/// Persistence contract for the slug to URL table.
///
/// Every call is a live, single-statement query; implementations must not
/// cache rows between calls.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSlugRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemorySlugRepository`] - in-process map
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SlugRepository: Send + Sync {
    /// Returns `true` iff a row with exactly this slug exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn exists(&self, slug: &str) -> Result<bool, AppError>;

    /// Inserts a new mapping.
    ///
    /// This is the authoritative uniqueness gate: it must fail atomically
    /// even when an earlier [`Self::exists`] returned `false`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateSlug`] on a unique constraint violation.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, slug: &str, url: &str) -> Result<ShortLink, AppError>;

    /// Finds a mapping by its slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<ShortLink>, AppError>;

    /// Counts all stored mappings.
    async fn count(&self) -> Result<i64, AppError>;

    /// Verifies the backend is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
