use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{Category, UserFeedbackRecord},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub user_id: String,
    pub place_id: String,
    pub liked: bool,
    pub category: Category,
}

/// Handler for the like/dislike feedback endpoint
///
/// Appends one record to the feedback log; nothing is ever updated in place.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FeedbackRequest>,
) -> AppResult<(StatusCode, Json<UserFeedbackRecord>)> {
    if request.user_id.trim().is_empty() {
        return Err(AppError::InvalidInput("user_id cannot be empty".to_string()));
    }
    if request.place_id.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "place_id cannot be empty".to_string(),
        ));
    }

    let record = UserFeedbackRecord::new(
        request.user_id,
        request.place_id,
        request.liked,
        request.category,
    );

    state.feedback.record(&record).await?;

    Ok((StatusCode::CREATED, Json(record)))
}
