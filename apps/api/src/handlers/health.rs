use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use crate::dto::HealthResponse;
use crate::state::AppState;

const SERVICE_NAME: &str = "venue-api";

pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.venue_service.check_storage().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                service: SERVICE_NAME,
                storage: "ok",
            }),
        ),
        Err(error) => {
            warn!(error = %error, "storage health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded",
                    service: SERVICE_NAME,
                    storage: "error",
                }),
            )
        }
    }
}
