use std::sync::Arc;

use anyhow::Result;
use tracing::warn;

use crate::clients::openai::{OpenAiClient, ScriptPrompt, ScriptPayload, VideoAnalysis};
use crate::db::Store;
use crate::models::script::{GeneratedScript, NewScript, ScriptStatus};
use crate::models::video::{VideoRecord, VideoStatus};

/// Caption used whenever the content generator is unavailable or fails.
pub const FALLBACK_CAPTION: &str = "Make money online with this simple trick! 💰";

fn fallback_script_payload() -> ScriptPayload {
    ScriptPayload {
        title: "Generated Script".to_string(),
        full_script: "Script generation failed due to technical error.".to_string(),
        hashtags: vec![],
        estimated_engagement: 0,
    }
}

/// Wraps the chat-completion collaborator: every call has a fixed fallback
/// payload, and generated artifacts are persisted to the store.
#[derive(Clone)]
pub struct GeneratorService {
    store: Store,
    openai: Option<Arc<OpenAiClient>>,
}

impl GeneratorService {
    pub fn new(store: Store, openai: Option<Arc<OpenAiClient>>) -> Self {
        Self { store, openai }
    }

    /// Rewrites trending text into a short caption. Never fails: missing
    /// configuration or a collaborator fault yields the fixed literal.
    pub async fn caption_for(&self, viral_text: &str) -> String {
        match &self.openai {
            Some(client) => match client.generate_caption(viral_text).await {
                Ok(caption) if !caption.is_empty() => caption,
                Ok(_) => FALLBACK_CAPTION.to_string(),
                Err(e) => {
                    warn!("Caption generation failed: {}", e);
                    FALLBACK_CAPTION.to_string()
                }
            },
            None => FALLBACK_CAPTION.to_string(),
        }
    }

    /// Generates a script and persists it. A collaborator fault persists
    /// the fallback payload instead of surfacing the error.
    pub async fn generate_script(&self, prompt: ScriptPrompt) -> Result<GeneratedScript> {
        let payload = match &self.openai {
            Some(client) => match client.generate_script(&prompt).await {
                Ok(payload) => payload,
                Err(e) => {
                    warn!("Script generation failed: {}", e);
                    fallback_script_payload()
                }
            },
            None => fallback_script_payload(),
        };

        let new_script = NewScript {
            title: if payload.title.is_empty() {
                "Generated Script".to_string()
            } else {
                payload.title
            },
            content: if payload.full_script.is_empty() {
                "Content generation failed".to_string()
            } else {
                payload.full_script
            },
            content_type: prompt.content_type,
            video_length: prompt.video_length,
            target_audience: prompt.target_audience,
            template_type: prompt.template_type,
            ai_generated: true,
            status: ScriptStatus::Generated,
        };

        let id = self.store.add_script(&new_script).await?;
        let script = self
            .store
            .get_script(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Script {id} missing after insert"))?;

        Ok(script)
    }

    /// Scores a stored video and promotes it to `processed`. A failed
    /// analysis records the zero-score verdict rather than aborting.
    pub async fn analyze_video(&self, id: i32) -> Result<Option<(VideoAnalysis, VideoRecord)>> {
        let Some(video) = self.store.get_video(id).await? else {
            return Ok(None);
        };

        let analysis = match &self.openai {
            Some(client) => {
                let transcript = video.transcript.as_deref().unwrap_or("");
                match client.analyze_video(&video.title, transcript).await {
                    Ok(analysis) => analysis,
                    Err(e) => {
                        warn!("Video analysis failed for {}: {}", id, e);
                        VideoAnalysis::failed()
                    }
                }
            }
            None => VideoAnalysis::failed(),
        };

        self.store
            .update_video_analysis(id, analysis.score, VideoStatus::Processed)
            .await?;

        let updated = self
            .store
            .get_video(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Video {id} missing after update"))?;

        Ok(Some((analysis, updated)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single connection: an in-memory SQLite database is per-connection.
    async fn memory_store() -> Store {
        Store::with_pool_options("sqlite::memory:", 1, 1).await.unwrap()
    }

    #[tokio::test]
    async fn test_caption_falls_back_without_generator() {
        let service = GeneratorService::new(memory_store().await, None);
        let caption = service.caption_for("trending text").await;
        assert_eq!(caption, FALLBACK_CAPTION);
    }

    #[tokio::test]
    async fn test_generate_script_persists_fallback_without_generator() {
        let store = memory_store().await;
        let service = GeneratorService::new(store.clone(), None);

        let script = service
            .generate_script(ScriptPrompt {
                content_type: "AI Tools".to_string(),
                video_length: "60s".to_string(),
                target_audience: "Entrepreneurs".to_string(),
                key_message: "automation pays".to_string(),
                template_type: "tips-tricks".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(script.status, ScriptStatus::Generated);
        assert!(script.ai_generated);
        assert_eq!(store.script_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_analyze_missing_video_is_none() {
        let service = GeneratorService::new(memory_store().await, None);
        assert!(service.analyze_video(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_analyze_without_generator_records_zero_score() {
        let store = memory_store().await;
        let id = store
            .add_video(&crate::models::video::NewVideo {
                title: "t".to_string(),
                platform: "TikTok".to_string(),
                url: "u".to_string(),
                views: 10,
                engagement_rate: 1.0,
                relevance_score: 50,
                captions: None,
                hashtags: vec![],
                status: VideoStatus::Discovered,
                transcript: None,
            })
            .await
            .unwrap();

        let service = GeneratorService::new(store.clone(), None);
        let (analysis, updated) = service.analyze_video(id).await.unwrap().unwrap();

        assert_eq!(analysis.score, 0);
        assert_eq!(updated.relevance_score, 0);
        assert_eq!(updated.status, VideoStatus::Processed);
    }
}
