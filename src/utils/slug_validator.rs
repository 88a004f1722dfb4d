//! Slug format validation.

use crate::domain::entities::Slug;
use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Compiled slug pattern: ASCII letters, digits and hyphens, at least one char.
static SLUG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-a-zA-Z0-9]+$").expect("slug pattern is a valid regex")
});

/// Returns `true` if `candidate` is a well-formed slug.
pub fn is_valid_slug(candidate: &str) -> bool {
    SLUG_REGEX.is_match(candidate)
}

/// Validates a candidate slug.
///
/// # Rules
///
/// - Non-empty
/// - Only ASCII letters, digits and `-`
///
/// Case is preserved; `Docs` and `docs` are different slugs.
///
/// # Errors
///
/// Returns [`AppError::InvalidSlug`] with `details.field = "slug"`.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_slug("my-link-2024").is_ok());
/// assert!(validate_slug("").is_err());
/// assert!(validate_slug("a/b").is_err());
/// ```
pub fn validate_slug(candidate: &str) -> Result<Slug, AppError> {
    if candidate.is_empty() {
        return Err(AppError::invalid_slug(
            "Slug must not be empty",
            json!({ "field": "slug" }),
        ));
    }

    if !is_valid_slug(candidate) {
        return Err(AppError::invalid_slug(
            "Slug can only contain letters, digits, and hyphens",
            json!({ "field": "slug", "slug": candidate }),
        ));
    }

    Ok(Slug::new_unchecked(candidate.to_string()))
}
