//! Router builder utilities for catalog routes

use crate::server::handlers::{AppState, health_check, list_collection, list_files};
use axum::{Router, routing::get};

/// Build catalog routes
///
/// - GET|POST /api/files - Paged directory listing
/// - GET|POST /api/{collection} - Paged, searchable, sortable collection view
pub fn build_catalog_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/files", get(list_files).post(list_files))
        .route(
            "/api/{collection}",
            get(list_collection).post(list_collection),
        )
        .with_state(state)
}

/// Build health check routes
pub fn build_health_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .with_state(state)
}
