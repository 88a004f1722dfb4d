//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod get_url;
pub mod health;
pub mod redirect;
pub mod slug;

pub use get_url::get_url_handler;
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use slug::{create_slug_handler, random_slug_handler, slug_check_handler};
