//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::codegen::HashMode;
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: database reachable and click queue open
/// - **503 Service Unavailable**: one of them failed
///
/// The `codegen` check reports `warn` while the service issues weak codes
/// only; it does not make the service unhealthy.
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = check_database(&state).await;
    let click_queue = check_click_queue(&state);
    let codegen = check_codegen(state.hash_mode);

    let healthy = !database.is_error() && !click_queue.is_error();

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database,
            click_queue,
            codegen,
        },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match sqlx::query("SELECT 1").execute(state.pool.as_ref()).await {
        Ok(_) => CheckStatus::ok("Connected"),
        Err(e) => CheckStatus::error(format!("Database error: {e}")),
    }
}

fn check_click_queue(state: &AppState) -> CheckStatus {
    if state.click_sender.is_closed() {
        CheckStatus::error("Click queue is closed")
    } else {
        CheckStatus::ok(format!(
            "Free slots: {} of {}",
            state.click_sender.capacity(),
            state.click_sender.max_capacity()
        ))
    }
}

fn check_codegen(mode: HashMode) -> CheckStatus {
    match mode {
        HashMode::Strong => CheckStatus::ok("sha256"),
        HashMode::WeakOnly => CheckStatus::warn("Strong hash disabled, issuing weak codes only"),
    }
}
