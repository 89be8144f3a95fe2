//! Mood-based recommendation endpoint.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::normalize::RecommendResponse;

use super::routes::AppState;
use super::types::*;

/// Recommend up to three tasks for the caller's mood.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RecommendRequest>,
) -> ApiResult<Json<RecommendResponse>> {
    let mood = req.mood.as_deref().map(str::trim).unwrap_or_default();
    if mood.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "mood is required"));
    }

    let tasks = match req.tasks {
        Some(tasks) if !tasks.is_empty() => tasks,
        _ => state.store.list_tasks(false).await.map_err(|e| {
            tracing::error!("Failed to load tasks for recommendation: {}", e);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?,
    };

    if tasks.is_empty() {
        return Ok(Json(RecommendResponse::default()));
    }

    let Some(assistant) = &state.assistant else {
        return Err(api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "GEMINI_API_KEY is not configured",
        ));
    };

    match assistant.recommend(mood, &tasks).await {
        Ok(response) => {
            tracing::debug!(
                "Recommended {} of {} tasks",
                response.recommendations.len(),
                tasks.len()
            );
            Ok(Json(response))
        }
        Err(e) => {
            tracing::warn!("Recommendation failed: {}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}
