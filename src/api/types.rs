use serde::{Deserialize, Serialize};

use crate::clients::openai::VideoAnalysis;
use crate::models::script::ScriptStatus;
use crate::models::video::VideoRecord;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyzeVideoResponse {
    pub analysis: VideoAnalysis,
    pub video: VideoRecord,
}

#[derive(Debug, Deserialize)]
pub struct GenerateScriptRequest {
    pub content_type: String,
    pub video_length: String,
    pub target_audience: String,
    pub key_message: String,
    pub template_type: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateScriptStatusRequest {
    pub status: ScriptStatus,
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime: u64,
    pub videos: i64,
    pub scripts: i64,
    pub analytics_entries: i64,
    pub products: usize,
    pub automation_running: bool,
    /// Credential variables that are unset; each disables its
    /// collaborator.
    pub missing_config: Vec<&'static str>,
}
