use axum::{Json, extract::State};
use serde_json::json;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::automation::AutomationStatus;

/// `POST /api/automation/start`
///
/// Idempotent: starting a running loop reports `already_running` rather
/// than spawning a second loop.
pub async fn start_automation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let outcome = state.automation.start().await;
    Ok(Json(ApiResponse::success(json!({ "status": outcome }))))
}

/// `POST /api/automation/stop`
///
/// Idempotent: stopping a stopped loop completes without fault.
pub async fn stop_automation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let outcome = state.automation.stop().await;
    Ok(Json(ApiResponse::success(json!({ "status": outcome }))))
}

/// `GET /api/automation/status`
pub async fn automation_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<AutomationStatus>>, ApiError> {
    Ok(Json(ApiResponse::success(state.automation.status().await)))
}
