//! Health check endpoint

use axum::Json;
use journal_common::time;
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    /// ISO-8601 UTC, millisecond precision
    pub timestamp: String,
}

/// GET /health
///
/// Always 200; the process answering is the whole check.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "Photo Journal API is running".to_string(),
        timestamp: time::to_iso8601(&time::now()),
    })
}
