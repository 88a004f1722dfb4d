//! Application error taxonomy and HTTP mapping.
//!
//! Every layer returns [`AppError`]. Client input problems are reported with
//! field-level detail, while internal failures are logged in full and reach
//! the client only as a generic message.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::error;

/// Message returned to clients for any internal failure.
const GENERIC_MESSAGE: &str = "An error occurred";

/// JSON error body.
///
/// `details` is omitted for generic failures so nothing internal leaks out.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,

    #[serde(skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Slug is empty or contains characters outside `[-a-zA-Z0-9]`.
    #[error("invalid slug: {message}")]
    InvalidSlug { message: String, details: Value },

    /// URL failed normalization.
    #[error("invalid url: {message}")]
    InvalidUrl { message: String, details: Value },

    /// Request body failed DTO validation.
    #[error("validation failed: {message}")]
    Validation { message: String, details: Value },

    /// The store rejected an insert on the unique slug constraint.
    #[error("slug already in use: {slug}")]
    DuplicateSlug { slug: String },

    #[error("not found: {message}")]
    NotFound { message: String, details: Value },

    /// Fixed-window limit exhausted for the client key.
    #[error("too many requests")]
    RateLimited { retry_after: Option<Duration> },

    #[error("internal error: {message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_slug(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidSlug {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }

    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn duplicate_slug(slug: impl Into<String>) -> Self {
        Self::DuplicateSlug { slug: slug.into() }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn rate_limited(retry_after: Option<Duration>) -> Self {
        Self::RateLimited { retry_after }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status for this error kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidSlug { .. } | Self::InvalidUrl { .. } | Self::Validation { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::DuplicateSlug { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing representation of the error.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            Self::InvalidSlug { message, details } => ErrorInfo {
                code: "invalid_slug",
                message: message.clone(),
                details: details.clone(),
            },
            Self::InvalidUrl { message, details } => ErrorInfo {
                code: "invalid_url",
                message: message.clone(),
                details: details.clone(),
            },
            Self::Validation { message, details } => ErrorInfo {
                code: "validation_error",
                message: message.clone(),
                details: details.clone(),
            },
            Self::DuplicateSlug { slug } => ErrorInfo {
                code: "slug_in_use",
                message: "Slug already in use".to_string(),
                details: json!({ "field": "slug", "slug": slug }),
            },
            Self::NotFound { message, details } => ErrorInfo {
                code: "not_found",
                message: message.clone(),
                details: details.clone(),
            },
            Self::RateLimited { retry_after } => ErrorInfo {
                code: "rate_limited",
                message: "Too many requests".to_string(),
                details: retry_after
                    .map(|d| json!({ "retry_after_seconds": d.as_secs().max(1) }))
                    .unwrap_or(Value::Null),
            },
            Self::Internal { .. } => ErrorInfo {
                code: "internal_error",
                message: GENERIC_MESSAGE.to_string(),
                details: Value::Null,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Internal { message, details } = &self {
            error!(%details, "{}", message);
        }

        let status = self.status_code();
        let body = self.to_error_info();
        let mut response = (status, Json(body)).into_response();

        if let Self::RateLimited {
            retry_after: Some(retry_after),
        } = self
            && let Ok(value) = HeaderValue::from_str(&retry_after.as_secs().max(1).to_string())
        {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }

        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::internal("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: serde_json::Map<String, Value> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), json!(messages))
            })
            .collect();

        let first_field = fields.keys().next().cloned();

        AppError::bad_request(
            "Request validation failed",
            json!({ "field": first_field, "fields": fields }),
        )
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let reason = rejection.body_text();
        let field = rejected_field(&reason).map(str::to_string);

        AppError::bad_request(
            "Invalid request body",
            json!({ "field": field, "reason": reason }),
        )
    }
}

/// Field path of a JSON data error, e.g. `slug` in
/// "Failed to deserialize the JSON body into the target type: slug: invalid type ...".
fn rejected_field(reason: &str) -> Option<&str> {
    let (_, rest) = reason.split_once("target type: ")?;
    let (path, _) = rest.split_once(": ")?;

    let is_path = !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '[' || c == ']');

    is_path.then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::invalid_slug("bad", Value::Null).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::duplicate_slug("taken").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::rate_limited(None).status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AppError::internal("boom", Value::Null).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_error_hides_details() {
        let info = AppError::internal("pool timed out", json!({ "host": "db" })).to_error_info();

        assert_eq!(info.code, "internal_error");
        assert_eq!(info.message, "An error occurred");
        assert!(info.details.is_null());
    }

    #[test]
    fn test_duplicate_slug_message() {
        let info = AppError::duplicate_slug("abc").to_error_info();
        assert_eq!(info.message, "Slug already in use");
        assert_eq!(info.details["field"], "slug");
    }

    #[test]
    fn test_rejected_field() {
        assert_eq!(
            rejected_field(
                "Failed to deserialize the JSON body into the target type: slug: invalid type: integer `5`, expected a string at line 1 column 9"
            ),
            Some("slug")
        );
        assert_eq!(
            rejected_field(
                "Failed to deserialize the JSON body into the target type: invalid type: integer `5`, expected struct CreateSlugRequest"
            ),
            None
        );
        assert_eq!(
            rejected_field("Failed to parse the request body as JSON: EOF while parsing"),
            None
        );
    }

    #[test]
    fn test_rate_limited_sets_retry_after_header() {
        let response = AppError::rate_limited(Some(Duration::from_secs(7))).into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "7");
    }
}
