//! HTTP API layer.
//!
//! Translates HTTP requests into [`crate::application::services::SlugService`]
//! calls and formats responses.
//!
//! # Modules
//!
//! - [`dto`] - Request/response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Edge rate limiting and request tracing
//! - [`routes`] - Route composition

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
