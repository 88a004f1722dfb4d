//! Core domain entities.
//!
//! - [`ShortLink`] - A persisted slug to URL mapping
//! - [`Slug`] - A slug that has passed format validation

pub mod short_link;
pub mod slug;

pub use short_link::ShortLink;
pub use slug::Slug;
