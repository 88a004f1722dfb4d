//! DTOs for the slug check, creation and suggestion endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string of `GET /api/slug/check`.
#[derive(Debug, Deserialize, Validate)]
pub struct SlugCheckQuery {
    #[serde(default)]
    #[validate(length(min = 1, message = "Slug is required"))]
    pub slug: String,
}

/// Body of `POST /api/slug`.
///
/// Only presence is checked here; format rules live in the service.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSlugRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Slug is required"))]
    pub slug: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "URL is required"))]
    pub url: String,
}

/// Response of `GET /api/slug/random`.
#[derive(Debug, Serialize)]
pub struct RandomSlugResponse {
    pub slug: String,
}
