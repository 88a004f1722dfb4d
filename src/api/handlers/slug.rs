//! Handlers backing the creation form.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::slug::{CreateSlugRequest, RandomSlugResponse, SlugCheckQuery};
use crate::application::services::SlugCheck;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_key::ClientKey;

/// Reports whether a slug is already taken.
///
/// # Endpoint
///
/// `GET /api/slug/check?slug={slug}`
///
/// # Response
///
/// ```json
/// { "used": false }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for a missing or malformed slug.
pub async fn slug_check_handler(
    State(state): State<AppState>,
    Query(query): Query<SlugCheckQuery>,
) -> Result<Json<SlugCheck>, AppError> {
    query.validate()?;

    let check = state.slug_service.check_slug(&query.slug).await?;

    Ok(Json(check))
}

/// Creates a slug mapping.
///
/// # Endpoint
///
/// `POST /api/slug`
///
/// # Request Body
///
/// ```json
/// { "slug": "my-link", "url": "example.com/some/page" }
/// ```
///
/// # Response Codes
///
/// - **201 Created**: mapping stored, empty body
/// - **400 Bad Request**: invalid slug or URL, or a body that is not the
///   expected JSON; `details.field` names the input when known
/// - **409 Conflict**: slug already in use
/// - **429 Too Many Requests**: creation limit reached for this client
pub async fn create_slug_handler(
    State(state): State<AppState>,
    ClientKey(client_key): ClientKey,
    payload: Result<Json<CreateSlugRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    state
        .slug_service
        .create_slug(&payload.slug, &payload.url, &client_key)
        .await?;

    Ok(StatusCode::CREATED)
}

/// Suggests a random unused slug.
///
/// # Endpoint
///
/// `GET /api/slug/random`
pub async fn random_slug_handler(
    State(state): State<AppState>,
) -> Result<Json<RandomSlugResponse>, AppError> {
    let slug = state.slug_service.suggest_slug().await?;

    Ok(Json(RandomSlugResponse { slug }))
}
