use serde::{Deserialize, Serialize};

/// Append-only performance snapshot per platform. There is no update path
/// for these rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEntry {
    pub id: i32,
    pub platform: String,
    pub views: i64,
    pub engagement_rate: f64,
    pub revenue: f64,
    pub conversion_rate: f64,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAnalyticsEntry {
    pub platform: String,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub engagement_rate: f64,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub conversion_rate: f64,
}
