//! Route configuration for the wine quality API

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;
use wine_core::InferencePipeline;

use crate::handlers;

/// Largest accepted request body (batch requests included)
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared handler state; the pipeline holds the model loaded at startup
#[derive(Clone)]
pub struct AppState {
    pub pipeline: InferencePipeline,
}

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Prediction endpoints
        .route("/api/predict", post(handlers::predict_handler))
        .route("/api/predict/batch", post(handlers::batch_predict_handler))

        // Reference endpoints
        .route("/api/catalog", get(handlers::catalog_handler))
        .route("/api/fields", get(handlers::fields_handler))
        .route("/api/info", get(handlers::info_handler))

        // Health checks
        .route("/health", get(handlers::health_handler))
        .route("/ready", get(handlers::ready_handler))

        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}
