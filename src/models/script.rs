use serde::{Deserialize, Serialize};

/// Scripts start out `generated` and can be promoted to `approved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptStatus {
    Generated,
    Approved,
}

impl ScriptStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Approved => "approved",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "approved" => Self::Approved,
            _ => Self::Generated,
        }
    }
}

impl std::fmt::Display for ScriptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedScript {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub content_type: String,
    pub video_length: String,
    pub target_audience: String,
    pub template_type: String,
    pub ai_generated: bool,
    pub status: ScriptStatus,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewScript {
    pub title: String,
    pub content: String,
    pub content_type: String,
    pub video_length: String,
    pub target_audience: String,
    pub template_type: String,
    #[serde(default = "default_true")]
    pub ai_generated: bool,
    #[serde(default = "default_status")]
    pub status: ScriptStatus,
}

const fn default_true() -> bool {
    true
}

const fn default_status() -> ScriptStatus {
    ScriptStatus::Generated
}
