use axum::{http::StatusCode, middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{CompareOptions, ReviewStore},
};

pub mod compare;

/// Shared state handed to every handler
pub struct AppState {
    pub review_store: Arc<dyn ReviewStore>,
    /// Options used when a request leaves `k` or `sim_min` out
    pub compare_defaults: CompareOptions,
}

impl AppState {
    pub fn new(review_store: Arc<dyn ReviewStore>, compare_defaults: CompareOptions) -> Self {
        Self {
            review_store,
            compare_defaults,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/users/:user_a/compare/:user_b", get(compare::compare))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
