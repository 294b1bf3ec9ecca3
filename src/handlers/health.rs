use axum::{extract::State, response::Json};
use chrono::Utc;

use crate::models::HealthResponse;
use crate::AppState;

/// Process liveness only; no upstream call.
/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        environment: state.config.environment.clone(),
        timestamp: Utc::now(),
    })
}
