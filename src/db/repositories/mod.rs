pub mod analytics;
pub mod product;
pub mod script;
pub mod video;

/// Textual timestamp in the same shape SQLite's `CURRENT_TIMESTAMP` emits.
#[must_use]
pub fn now_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
