use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{CollaboratorError, CollaboratorResult};
use crate::config::OpenAiConfig;

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Parameters for a script generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptPrompt {
    pub content_type: String,
    pub video_length: String,
    pub target_audience: String,
    pub key_message: String,
    pub template_type: String,
}

/// Structured output of a script generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub full_script: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub estimated_engagement: i32,
}

/// Structured output of a relevance analysis call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoAnalysis {
    #[serde(default)]
    pub score: i32,
    #[serde(default)]
    pub engagement_quality: String,
    #[serde(default)]
    pub content_themes: Vec<String>,
    #[serde(default)]
    pub success_factors: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl VideoAnalysis {
    /// Zero-score verdict used when the analysis call fails.
    #[must_use]
    pub fn failed() -> Self {
        Self {
            score: 0,
            engagement_quality: "unknown".to_string(),
            content_themes: vec!["analysis_failed".to_string()],
            success_factors: vec!["Could not analyze".to_string()],
            recommendations: vec!["Retry analysis".to_string()],
        }
    }
}

/// Chat-completion client. Opaque collaborator: one request per call, no
/// retries, failures surface as `CollaboratorError` for the caller to map
/// onto a fallback.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &OpenAiConfig, client: Client) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    async fn chat(&self, body: serde_json::Value) -> CollaboratorResult<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(CollaboratorError::UnexpectedResponse(format!(
                "{status}: {text}"
            )));
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| CollaboratorError::UnexpectedResponse("empty choices".to_string()))
    }

    /// Rewrites a trending caption into short promotional copy.
    pub async fn generate_caption(&self, viral_text: &str) -> CollaboratorResult<String> {
        let body = json!({
            "model": self.model,
            "messages": [
                {
                    "role": "system",
                    "content": "You are a social media content creator. Create engaging, viral content for TikTok/Instagram that promotes affiliate marketing. Keep it under 150 characters."
                },
                {
                    "role": "user",
                    "content": format!("Create viral content based on: {viral_text}")
                }
            ],
            "max_tokens": 100
        });

        let content = self.chat(body).await?;
        Ok(content.trim().to_string())
    }

    /// Generates a full video script as structured JSON.
    pub async fn generate_script(&self, prompt: &ScriptPrompt) -> CollaboratorResult<ScriptPayload> {
        let user_prompt = format!(
            "Generate a viral video script for affiliate marketing with these parameters:\n\
             - Content Type: {}\n\
             - Video Length: {}\n\
             - Target Audience: {}\n\
             - Key Message: {}\n\
             - Template Type: {}\n\n\
             Focus on high-ticket affiliate products, authentic storytelling with real income \
             numbers, trust-building through personal experiences, and a clear call-to-action.\n\n\
             Return JSON with: title, full_script, hashtags (array), estimated_engagement (0-100).",
            prompt.content_type,
            prompt.video_length,
            prompt.target_audience,
            prompt.key_message,
            prompt.template_type
        );

        let body = json!({
            "model": self.model,
            "messages": [
                {
                    "role": "system",
                    "content": "You are an expert at creating viral affiliate marketing scripts. Respond with valid JSON only."
                },
                { "role": "user", "content": user_prompt }
            ],
            "response_format": { "type": "json_object" }
        });

        let content = self.chat(body).await?;
        serde_json::from_str(&content)
            .map_err(|e| CollaboratorError::UnexpectedResponse(format!("invalid script JSON: {e}")))
    }

    /// Scores a stored video for affiliate marketing relevance.
    pub async fn analyze_video(
        &self,
        title: &str,
        transcript: &str,
    ) -> CollaboratorResult<VideoAnalysis> {
        let user_prompt = format!(
            "Analyze this viral video for affiliate marketing potential. Title: \"{title}\". \
             Transcript: \"{transcript}\"\n\n\
             Provide a JSON response with:\n\
             - score: 0-100 rating for affiliate marketing potential\n\
             - engagement_quality: \"high\", \"medium\", or \"low\"\n\
             - content_themes: array of main themes\n\
             - success_factors: array of reasons why it's viral\n\
             - recommendations: array of actionable suggestions"
        );

        let body = json!({
            "model": self.model,
            "messages": [
                {
                    "role": "system",
                    "content": "You are an expert at analyzing viral content for affiliate marketing potential. Respond with valid JSON only."
                },
                { "role": "user", "content": user_prompt }
            ],
            "response_format": { "type": "json_object" }
        });

        let content = self.chat(body).await?;
        serde_json::from_str(&content).map_err(|e| {
            CollaboratorError::UnexpectedResponse(format!("invalid analysis JSON: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_payload_tolerates_missing_fields() {
        let payload: ScriptPayload = serde_json::from_str(r#"{"title": "Only a title"}"#).unwrap();
        assert_eq!(payload.title, "Only a title");
        assert!(payload.full_script.is_empty());
        assert!(payload.hashtags.is_empty());
    }

    #[test]
    fn test_failed_analysis_is_zero_scored() {
        let analysis = VideoAnalysis::failed();
        assert_eq!(analysis.score, 0);
        assert_eq!(analysis.engagement_quality, "unknown");
    }
}
