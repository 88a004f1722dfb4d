//! API route configuration.
//!
//! All API endpoints are public; there is no link ownership.

use crate::api::handlers::{
    create_slug_handler, get_url_handler, random_slug_handler, slug_check_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Procedure endpoints consumed by the creation form.
///
/// # Endpoints
///
/// - `GET  /slug/check`  - `slug.slugCheck`: is the slug taken?
/// - `POST /slug`        - `slug.createSlug`: store a new mapping
/// - `GET  /slug/random` - suggest an unused random slug
pub fn slug_routes() -> Router<AppState> {
    Router::new()
        .route("/slug", post(create_slug_handler))
        .route("/slug/check", get(slug_check_handler))
        .route("/slug/random", get(random_slug_handler))
}

/// Public lookup endpoint, also called in-process by the redirect layer.
///
/// # Endpoints
///
/// - `GET /get-url/{slug}` - stored mapping as cacheable JSON
pub fn lookup_routes() -> Router<AppState> {
    Router::new().route("/get-url/{slug}", get(get_url_handler))
}
