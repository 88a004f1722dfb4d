//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain and application
//! layers.
//!
//! # Modules
//!
//! - [`persistence`] - Slug store implementations (PostgreSQL and in-memory)
//! - [`rate_limit`] - Fixed-window limiters (Redis and in-memory)

pub mod persistence;
pub mod rate_limit;
