use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, GenerateScriptRequest, UpdateScriptStatusRequest};
use crate::clients::openai::ScriptPrompt;
use crate::models::script::{GeneratedScript, NewScript};

/// `GET /api/scripts`
///
/// All scripts, newest first.
pub async fn list_scripts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<GeneratedScript>>>, ApiError> {
    let scripts = state.store().list_scripts().await?;
    Ok(Json(ApiResponse::success(scripts)))
}

/// `POST /api/scripts`
pub async fn add_script(
    State(state): State<Arc<AppState>>,
    Json(script): Json<NewScript>,
) -> Result<Json<ApiResponse<GeneratedScript>>, ApiError> {
    if script.title.is_empty() || script.content.is_empty() {
        return Err(ApiError::validation("title and content are required"));
    }

    let id = state.store().add_script(&script).await?;
    let stored = state
        .store()
        .get_script(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Script", id))?;

    Ok(Json(ApiResponse::success(stored)))
}

/// `POST /api/scripts/generate`
///
/// Generator-backed creation. The result is persisted even when the
/// collaborator fails (fallback payload).
pub async fn generate_script(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateScriptRequest>,
) -> Result<Json<ApiResponse<GeneratedScript>>, ApiError> {
    if request.content_type.is_empty()
        || request.video_length.is_empty()
        || request.target_audience.is_empty()
        || request.key_message.is_empty()
        || request.template_type.is_empty()
    {
        return Err(ApiError::validation("Missing required fields"));
    }

    let script = state
        .generator
        .generate_script(ScriptPrompt {
            content_type: request.content_type,
            video_length: request.video_length,
            target_audience: request.target_audience,
            key_message: request.key_message,
            template_type: request.template_type,
        })
        .await?;

    Ok(Json(ApiResponse::success(script)))
}

/// `PUT /api/scripts/{id}/status`
pub async fn update_script_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateScriptStatusRequest>,
) -> Result<Json<ApiResponse<GeneratedScript>>, ApiError> {
    if !state.store().update_script_status(id, request.status).await? {
        return Err(ApiError::not_found("Script", id));
    }

    let stored = state
        .store()
        .get_script(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Script", id))?;

    Ok(Json(ApiResponse::success(stored)))
}
