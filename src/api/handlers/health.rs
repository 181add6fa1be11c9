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
/// The upstream is not probed: a health check must not spend upstream quota.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "cache": {
///       "status": "ok",
///       "message": "Entries: 42"
///     }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let cache_check = check_cache(&state).await;

    let all_healthy = cache_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { cache: cache_check },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks the response cache and reports how many entries it holds.
async fn check_cache(state: &AppState) -> CheckStatus {
    if state.lookup_service.cache_healthy().await {
        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!(
                "Entries: {}",
                state.lookup_service.cached_entries().await
            )),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Cache unavailable".to_string()),
        }
    }
}
