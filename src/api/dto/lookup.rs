//! DTO consumed by the redirect layer from the lookup endpoint.

use serde::Deserialize;

/// The part of a lookup response the redirect layer needs.
#[derive(Debug, Deserialize)]
pub struct LookupTarget {
    pub url: String,
}
