//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /r/{*path}`           - Short link redirect through the lookup endpoint
//! - `GET  /api/get-url/{slug}`  - JSON lookup (cacheable, CORS-open)
//! - `GET  /api/slug/check`      - Slug availability
//! - `POST /api/slug`            - Slug creation (fixed-window limited per client)
//! - `GET  /api/slug/random`     - Random slug suggestion
//! - `GET  /health`              - Health check
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket at the edge
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::state::{AppState, RedirectState};
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router serving only the JSON lookup endpoint.
pub fn lookup_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api::routes::lookup_routes())
        .with_state(state)
}

/// Builds all routes without edge protection.
///
/// The redirect layer gets its own copy of the lookup router and calls it
/// in-process.
pub fn build_router(state: AppState, public_origin: &str) -> Router {
    let redirect_state = RedirectState::new(lookup_router(state.clone()), public_origin);

    let redirects = Router::new()
        .route("/r/{*path}", get(redirect_handler))
        .with_state(redirect_state);

    let api_router = api::routes::slug_routes().merge(api::routes::lookup_routes());

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .merge(redirects)
        .layer(tracing::layer())
}

/// Constructs the production router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `public_origin` - redirect target for unknown slugs
/// - `behind_proxy` - when `true`, the edge limiter reads client IP from
///   forwarding headers instead of the peer socket address; enable only when
///   the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, public_origin: &str, behind_proxy: bool) -> NormalizePath<Router> {
    let router = build_router(state, public_origin);

    let router = if behind_proxy {
        router.layer(rate_limit::proxy_layer())
    } else {
        router.layer(rate_limit::layer())
    };

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
