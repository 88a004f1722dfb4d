//! Application layer services implementing business logic.
//!
//! Services consume repository and rate limiter traits and expose the
//! operations HTTP handlers and the admin CLI call.
//!
//! # Available Services
//!
//! - [`services::slug_service::SlugService`] - Slug check, creation, resolution and suggestion

pub mod services;
