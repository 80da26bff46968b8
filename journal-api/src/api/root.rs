//! Root info endpoint

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
}

/// GET /
pub async fn root_info() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Welcome to Photo Journal API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
