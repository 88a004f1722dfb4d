//! Short link entity representing a slug to URL mapping.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A persisted short link.
///
/// Created once, never updated or deleted. Serializes to the lookup
/// endpoint's JSON shape (`slug`, `url`, `createdAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortLink {
    pub slug: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(slug: String, url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            slug,
            url,
            created_at,
        }
    }
}
