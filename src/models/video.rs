use serde::{Deserialize, Serialize};

/// Lifecycle of a discovered video: `discovered` on insert, `processed`
/// once a relevance analysis has been recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoStatus {
    Discovered,
    Processed,
}

impl VideoStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Discovered => "discovered",
            Self::Processed => "processed",
        }
    }

    /// Unknown strings fall back to `discovered` rather than failing the
    /// whole row.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "processed" => Self::Processed,
            _ => Self::Discovered,
        }
    }
}

impl std::fmt::Display for VideoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: i32,
    pub title: String,
    pub platform: String,
    pub url: String,
    pub views: i64,
    pub engagement_rate: f64,
    pub relevance_score: i32,
    pub captions: Option<String>,
    pub hashtags: Vec<String>,
    pub status: VideoStatus,
    pub transcript: Option<String>,
    pub created_at: String,
}

/// Insert payload. Scores and counts are taken as-is; the store enforces
/// no range constraints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVideo {
    pub title: String,
    pub platform: String,
    pub url: String,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub engagement_rate: f64,
    #[serde(default)]
    pub relevance_score: i32,
    #[serde(default)]
    pub captions: Option<String>,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default = "default_status")]
    pub status: VideoStatus,
    #[serde(default)]
    pub transcript: Option<String>,
}

const fn default_status() -> VideoStatus {
    VideoStatus::Discovered
}

/// Hashtags live in a single text column; the domain surface is a list.
#[must_use]
pub fn join_hashtags(tags: &[String]) -> String {
    tags.join(" ")
}

#[must_use]
pub fn split_hashtags(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        assert_eq!(VideoStatus::parse("processed"), VideoStatus::Processed);
        assert_eq!(VideoStatus::parse("discovered"), VideoStatus::Discovered);
        assert_eq!(VideoStatus::parse("garbage"), VideoStatus::Discovered);
        assert_eq!(VideoStatus::Processed.as_str(), "processed");
    }

    #[test]
    fn test_hashtag_join_split() {
        let tags = vec!["#passiveincome".to_string(), "#sidehustle".to_string()];
        let joined = join_hashtags(&tags);
        assert_eq!(joined, "#passiveincome #sidehustle");
        assert_eq!(split_hashtags(&joined), tags);
        assert!(split_hashtags("").is_empty());
    }
}
