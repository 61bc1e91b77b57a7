//! Liveness probe.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub message: &'static str,
}

/// `GET /health`
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        message: "Multi-portal proxy server is running",
    })
}
