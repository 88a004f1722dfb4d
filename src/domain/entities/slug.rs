//! Validated slug newtype.

use std::fmt;

/// A slug known to match `^[-a-zA-Z0-9]+$`.
///
/// Only [`crate::utils::slug_validator::validate_slug`] constructs it, so
/// holding a `Slug` means the format check already ran.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
