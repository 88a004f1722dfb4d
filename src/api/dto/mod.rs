//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs use `validator` so missing fields come back as field-level
//! errors rather than extractor rejections.

pub mod health;
pub mod lookup;
pub mod slug;
