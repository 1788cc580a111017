//! # Health Handler

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::state::AppState;

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HealthDto {
    pub status: String,
    pub message: String,
}

/// `GET /api/health`
///
/// 200 `{"status": "OK"}` while the database answers, 503 otherwise.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthDto>) {
    if state.db().health_check().await {
        (
            StatusCode::OK,
            Json(HealthDto {
                status: "OK".to_string(),
                message: "Stockpile API is running".to_string(),
            }),
        )
    } else {
        warn!("Health check failed: database unreachable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthDto {
                status: "UNAVAILABLE".to_string(),
                message: "Database is unreachable".to_string(),
            }),
        )
    }
}
