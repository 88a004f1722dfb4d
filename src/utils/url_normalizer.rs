//! Destination URL normalization.
//!
//! The check is deliberately coarse: it guarantees a scheme and a dotted
//! host, nothing about reachability or TLD validity.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;
use url::Url;

/// Scheme used when the input has none.
const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// Matches a leading `scheme://`.
static SCHEME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://").expect("scheme pattern is a valid regex")
});

/// Normalizes a raw destination URL.
///
/// # Rules
///
/// 1. Surrounding whitespace is trimmed; control characters are rejected
/// 2. `https://` is prepended when no `scheme://` prefix is present
/// 3. The result must parse as an absolute URL with a host
/// 4. The host must contain at least one `.`
///
/// The returned string is the prefixed input, not a re-serialized URL, so no
/// trailing slash or case folding is introduced.
///
/// # Errors
///
/// Returns [`AppError::InvalidUrl`] with `details.field = "url"`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("example.com").unwrap(), "https://example.com");
/// assert_eq!(normalize_url("http://x.com").unwrap(), "http://x.com");
/// assert!(normalize_url("nodothost").is_err());
/// ```
pub fn normalize_url(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(AppError::invalid_url(
            "URL must not be empty",
            json!({ "field": "url" }),
        ));
    }

    if trimmed.chars().any(char::is_control) {
        return Err(AppError::invalid_url(
            "URL must not contain control characters",
            json!({ "field": "url" }),
        ));
    }

    let normalized = if SCHEME_REGEX.is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("{DEFAULT_SCHEME_PREFIX}{trimmed}")
    };

    let parsed = Url::parse(&normalized).map_err(|e| {
        AppError::invalid_url(
            "Invalid URL format",
            json!({ "field": "url", "reason": e.to_string() }),
        )
    })?;

    let has_dotted_host = parsed.host_str().is_some_and(|host| host.contains('.'));
    if !has_dotted_host {
        return Err(AppError::invalid_url(
            "URL host must contain a dot",
            json!({ "field": "url", "url": raw }),
        ));
    }

    Ok(normalized)
}
