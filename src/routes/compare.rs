use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{ComparisonResult, UserId},
    routes::AppState,
    services::{comparison, CompareOptions},
};

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub k: Option<usize>,
    pub sim_min: Option<f64>,
}

/// Handler for the user compatibility endpoint
pub async fn compare(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path((user_a, user_b)): Path<(String, String)>,
    Query(query): Query<CompareQuery>,
) -> AppResult<Json<ComparisonResult>> {
    let options = CompareOptions {
        k: query.k.unwrap_or(state.compare_defaults.k),
        sim_min: query.sim_min.unwrap_or(state.compare_defaults.sim_min),
    };

    tracing::info!(
        request_id = %request_id,
        user_a = %user_a,
        user_b = %user_b,
        k = options.k,
        sim_min = options.sim_min,
        "Processing comparison request"
    );

    let result = comparison::compare_users(
        state.review_store.as_ref(),
        &UserId(user_a),
        &UserId(user_b),
        options,
    )
    .await?;

    Ok(Json(result))
}
