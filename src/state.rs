//! Shared application state injected into handlers.

use crate::application::services::SlugService;
use axum::Router;
use std::sync::Arc;

/// State shared by the slug API and lookup handlers.
#[derive(Clone)]
pub struct AppState {
    pub slug_service: Arc<SlugService>,
}

impl AppState {
    pub fn new(slug_service: Arc<SlugService>) -> Self {
        Self { slug_service }
    }
}

/// State of the `/r/{slug}` rewrite layer.
///
/// Holds the lookup router itself rather than the service, so redirects go
/// through the same JSON endpoint external clients use.
#[derive(Clone)]
pub struct RedirectState {
    pub lookup: Router,
    pub public_origin: Arc<str>,
}

impl RedirectState {
    pub fn new(lookup: Router, public_origin: impl Into<Arc<str>>) -> Self {
        Self {
            lookup,
            public_origin: public_origin.into(),
        }
    }
}
