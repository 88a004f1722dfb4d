//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Database**: store ping
/// 2. **Rate limiter**: backend ping, or `disabled` when not configured
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;
    let limiter_check = check_rate_limiter(&state).await;

    let all_healthy = db_check.is_ok() && limiter_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            rate_limiter: limiter_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.slug_service.store_health().await {
        Ok(()) => CheckStatus::ok("Connected"),
        Err(e) => CheckStatus::error(format!("Database error: {}", e)),
    }
}

async fn check_rate_limiter(state: &AppState) -> CheckStatus {
    let Some(limiter) = state.slug_service.rate_limiter() else {
        return CheckStatus::ok("disabled");
    };

    if limiter.health_check().await {
        CheckStatus::ok(format!("{} backend reachable", limiter.backend()))
    } else {
        CheckStatus::error(format!("{} backend unreachable", limiter.backend()))
    }
}
