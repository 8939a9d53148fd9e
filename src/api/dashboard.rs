use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::services::stats::DashboardStats;

/// `GET /api/dashboard/stats`
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<DashboardStats>>, ApiError> {
    let stats = state.stats.dashboard_stats().await?;
    Ok(Json(ApiResponse::success(stats)))
}
