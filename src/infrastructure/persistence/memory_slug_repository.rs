//! In-memory implementation of the slug repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::ShortLink;
use crate::domain::repositories::SlugRepository;
use crate::error::AppError;

/// Slug store backed by a `HashMap` behind a mutex.
///
/// The existence check and insert in [`SlugRepository::create`] happen under
/// one lock acquisition, which gives the same single-winner guarantee as the
/// database unique constraint. Data lives only as long as the process.
#[derive(Default)]
pub struct MemorySlugRepository {
    links: Mutex<HashMap<String, ShortLink>>,
}

impl MemorySlugRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn links(&self) -> Result<MutexGuard<'_, HashMap<String, ShortLink>>, AppError> {
        self.links.lock().map_err(|e| {
            AppError::internal(
                "In-memory store unavailable",
                json!({ "reason": e.to_string() }),
            )
        })
    }
}

#[async_trait]
impl SlugRepository for MemorySlugRepository {
    async fn exists(&self, slug: &str) -> Result<bool, AppError> {
        Ok(self.links()?.contains_key(slug))
    }

    async fn create(&self, slug: &str, url: &str) -> Result<ShortLink, AppError> {
        let mut links = self.links()?;

        if links.contains_key(slug) {
            return Err(AppError::duplicate_slug(slug));
        }

        let link = ShortLink::new(slug.to_string(), url.to_string(), Utc::now());
        links.insert(slug.to_string(), link.clone());

        Ok(link)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self.links()?.get(slug).cloned())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.links()?.len() as i64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.links().map(|_| ())
    }
}
