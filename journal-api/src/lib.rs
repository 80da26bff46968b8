//! journal-api library - Photo Journal API stub
//!
//! Two read-only JSON endpoints behind a fixed middleware stack:
//! access logging, permissive CORS, gzip compression and security headers.

use axum::Router;

pub mod api;
pub mod config;
pub mod middleware;

/// Build application router with all cross-cutting layers applied
pub fn build_router() -> Router {
    use axum::routing::get;

    let routes = Router::new()
        .route("/", get(api::root_info))
        .route("/health", get(api::health_check));

    middleware::apply(routes)
}
