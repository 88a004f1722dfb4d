//! Helpers shared across layers.
//!
//! - [`slug_validator`] - Slug format validation
//! - [`url_normalizer`] - Destination URL normalization
//! - [`slug_generator`] - Random word slug generation
//! - [`client_key`] - Rate-limit key extraction from request metadata

pub mod client_key;
pub mod slug_generator;
pub mod slug_validator;
pub mod url_normalizer;
