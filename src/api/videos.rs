use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{AnalyzeVideoResponse, ApiError, ApiResponse, AppState};
use crate::models::video::{NewVideo, VideoRecord};

/// `GET /api/videos`
///
/// All stored videos, highest relevance score first.
pub async fn list_videos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<VideoRecord>>>, ApiError> {
    let videos = state.store().list_videos().await?;
    Ok(Json(ApiResponse::success(videos)))
}

/// `POST /api/videos`
pub async fn add_video(
    State(state): State<Arc<AppState>>,
    Json(video): Json<NewVideo>,
) -> Result<Json<ApiResponse<VideoRecord>>, ApiError> {
    if video.title.is_empty() || video.platform.is_empty() || video.url.is_empty() {
        return Err(ApiError::validation(
            "title, platform and url are required",
        ));
    }

    let id = state.store().add_video(&video).await?;
    let stored = state
        .store()
        .get_video(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Video", id))?;

    Ok(Json(ApiResponse::success(stored)))
}

/// `POST /api/videos/{id}/analyze`
///
/// Scores the video via the content generator and promotes it to
/// `processed`. A generator failure records the zero-score verdict.
pub async fn analyze_video(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<AnalyzeVideoResponse>>, ApiError> {
    let Some((analysis, video)) = state.generator.analyze_video(id).await? else {
        return Err(ApiError::not_found("Video", id));
    };

    Ok(Json(ApiResponse::success(AnalyzeVideoResponse {
        analysis,
        video,
    })))
}
