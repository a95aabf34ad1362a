use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware::from_fn,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    db::FeedbackStore,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{
        providers::{PlaceDirectory, ReviewClassifier},
        recommendations::PipelineLimits,
    },
};

pub mod feedback;
pub mod recommend;

/// Pipeline context built once at startup and passed into every handler
///
/// Holds the shared provider instances, the feedback store, and the
/// configured pipeline bounds. There is no other process-wide state.
pub struct AppState {
    pub directory: Arc<dyn PlaceDirectory>,
    pub classifier: Arc<dyn ReviewClassifier>,
    pub feedback: FeedbackStore,
    pub limits: PipelineLimits,
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes(state))
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// API routes under /api/v1
fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/recommendations", post(recommend::recommend))
        .route("/feedback", post(feedback::submit))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
