use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::AppState;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "moodai-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    if state.config.llm_configured() {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "checks": { "text_generation": "configured" },
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "checks": { "text_generation": "missing api key" },
            })),
        )
    }
}

pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".into())
}
