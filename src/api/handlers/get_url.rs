//! Handler for the public slug lookup endpoint.

use axum::{
    Json,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;

/// Cache directive for successful lookups; mappings never change once created.
pub const LOOKUP_CACHE_CONTROL: &str = "s-maxage=1000000000, stale-while-revalidate";

/// Returns the stored mapping for a slug.
///
/// This endpoint is the single source of truth for resolution; the `/r/`
/// redirect layer calls it rather than the service.
///
/// # Endpoint
///
/// `GET /api/get-url/{slug}`
///
/// # Response
///
/// ```json
/// { "slug": "abc-1", "url": "https://example.com", "createdAt": "2024-01-15T10:30:00Z" }
/// ```
///
/// Successful responses carry a long shared-cache lifetime and
/// `Access-Control-Allow-Origin: *`.
///
/// # Errors
///
/// - 404 Not Found with `"message": "slug not found"`
/// - 400 Bad Request for a malformed slug
pub async fn get_url_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let link = state.slug_service.resolve_slug(&slug).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::CACHE_CONTROL, LOOKUP_CACHE_CONTROL),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        Json(link),
    )
        .into_response())
}
