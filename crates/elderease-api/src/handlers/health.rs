//! Liveness and health endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET / - plain-text liveness banner.
pub async fn root() -> &'static str {
    "ElderEase API is running"
}

/// GET /health - store connectivity.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let backend = state.stores.backend().to_string();
    match state.stores.health_check().await {
        Ok(true) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                database: "up".to_string(),
                backend,
            }),
        ),
        Ok(false) | Err(_) => {
            tracing::warn!(backend = %backend, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded".to_string(),
                    database: "down".to_string(),
                    backend,
                }),
            )
        }
    }
}
