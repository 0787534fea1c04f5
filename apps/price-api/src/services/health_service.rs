//! Health check endpoint for monitoring and load balancers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::warn;

use crate::AppState;

/// Health report.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok` or `degraded`
    pub status: &'static str,
    /// `ok` or `unavailable`
    pub database: &'static str,
    pub migrations_applied: usize,
    pub migrations_total: usize,
    pub server_time: String,
}

/// `GET /health`
///
/// Answers 200 while the database responds and 503 otherwise.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let server_time = Utc::now().to_rfc3339();

    if !state.db.health_check().await {
        warn!("Health check: database unavailable");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "degraded",
                database: "unavailable",
                migrations_applied: 0,
                migrations_total: 0,
                server_time,
            }),
        );
    }

    let (total, applied) = state.db.migration_status().await.unwrap_or((0, 0));

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            database: "ok",
            migrations_applied: applied,
            migrations_total: total,
            server_time,
        }),
    )
}
