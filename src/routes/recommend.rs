use std::sync::Arc;

use axum::{extract::State, Extension, Json};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    routes::AppState,
    services::recommendations::{self, RecommendationRequest, RecommendationResponse},
};

/// Handler for the recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(
        request_id = %request_id,
        has_user = request.user_id.is_some(),
        preferred_categories = request.preferred_categories.len(),
        "Processing recommendation request"
    );

    let response = recommendations::recommend(
        state.directory.clone(),
        state.classifier.clone(),
        &state.feedback,
        &state.limits,
        request,
    )
    .await?;

    tracing::info!(
        request_id = %request_id,
        results = response.results.len(),
        "Recommendation request completed"
    );

    Ok(Json(response))
}
