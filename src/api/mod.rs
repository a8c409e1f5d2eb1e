//! API module for the growth dashboard
//!
//! Provides the REST interface over the growth engine.

pub mod service;
pub mod handlers;

pub use service::GrowthService;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn router(service: Arc<GrowthService>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(handlers::health))
        .route("/api/v1/dataset", get(handlers::get_dataset))
        .route("/api/v1/dataset/reload", post(handlers::reload_dataset))
        .route("/api/v1/growth", get(handlers::get_growth))
        .route("/api/v1/geography", get(handlers::get_geography))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
