use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::models::analytics::{AnalyticsEntry, NewAnalyticsEntry};

/// `GET /api/analytics`
pub async fn list_analytics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<AnalyticsEntry>>>, ApiError> {
    let entries = state.store().list_analytics().await?;
    Ok(Json(ApiResponse::success(entries)))
}

/// `POST /api/analytics`
///
/// Append-only; there is no update path for analytics rows.
pub async fn add_analytics(
    State(state): State<Arc<AppState>>,
    Json(entry): Json<NewAnalyticsEntry>,
) -> Result<Json<ApiResponse<i32>>, ApiError> {
    if entry.platform.is_empty() {
        return Err(ApiError::validation("platform is required"));
    }

    let id = state.store().add_analytics(&entry).await?;
    Ok(Json(ApiResponse::success(id)))
}
