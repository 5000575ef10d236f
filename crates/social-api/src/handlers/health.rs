//! Health check handlers
//!
//! Endpoints for liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use social_service::{HealthResponse, ReadinessResponse};
use tracing::warn;

use crate::state::AppState;

/// Basic health check (liveness probe)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check with dependency health
///
/// GET /health/ready
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let ctx = state.service_context();

    let db_healthy = match sqlx::query("SELECT 1").execute(ctx.pool()).await {
        Ok(_) => true,
        Err(e) => {
            warn!(error = %e, "Database readiness check failed");
            false
        }
    };

    let redis_healthy = match ctx.redis_pool().health_check().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Redis readiness check failed");
            false
        }
    };

    let response = ReadinessResponse::ready(db_healthy, redis_healthy);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
