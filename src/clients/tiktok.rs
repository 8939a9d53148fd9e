use regex::Regex;
use reqwest::Client;
use std::sync::OnceLock;

use super::{CollaboratorError, CollaboratorResult};
use crate::config::TikTokConfig;

/// A trending post as scraped from the discovery page.
#[derive(Debug, Clone)]
pub struct TrendingPost {
    pub text: String,
    pub url: String,
}

/// Captions shorter than this are navigation chrome, not post text.
const MIN_CAPTION_LEN: usize = 20;

/// Consolidates regexes for page extraction to avoid per-call overhead.
struct TrendingRegex {
    desc: Regex,
    item_id: Regex,
}

impl TrendingRegex {
    fn get() -> Option<&'static Self> {
        static INSTANCE: OnceLock<Option<TrendingRegex>> = OnceLock::new();
        INSTANCE
            .get_or_init(|| {
                Some(Self {
                    // Post descriptions inside the embedded state JSON.
                    desc: Regex::new(r#""desc"\s*:\s*"((?:[^"\\]|\\.)*)""#).ok()?,
                    item_id: Regex::new(r#""id"\s*:\s*"(\d{8,})""#).ok()?,
                })
            })
            .as_ref()
    }
}

fn unescape_json_string(raw: &str) -> String {
    let unescaped = raw
        .replace("\\\"", "\"")
        .replace("\\n", " ")
        .replace("\\/", "/")
        .replace("\\\\", "\\");
    html_escape::decode_html_entities(&unescaped).to_string()
}

/// TikTok collaborator. Scanning needs no credentials; posting requires a
/// configured username/password pair.
#[derive(Clone)]
pub struct TikTokClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl TikTokClient {
    pub fn new(config: &TikTokConfig, client: Client) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    /// Scrapes the trending page for post captions. Returns at most the
    /// top five usable posts, matching the upstream page ordering.
    pub async fn scan_trending(&self) -> CollaboratorResult<Vec<TrendingPost>> {
        let url = format!("{}/trending", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(CollaboratorError::UnexpectedResponse(format!(
                "trending page returned {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        Ok(Self::extract_posts(&self.base_url, &body))
    }

    fn extract_posts(base_url: &str, body: &str) -> Vec<TrendingPost> {
        let Some(re) = TrendingRegex::get() else {
            return Vec::new();
        };

        let ids: Vec<String> = re
            .item_id
            .captures_iter(body)
            .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
            .collect();

        re.desc
            .captures_iter(body)
            .filter_map(|c| c.get(1).map(|m| unescape_json_string(m.as_str())))
            .enumerate()
            .filter(|(_, text)| text.len() > MIN_CAPTION_LEN)
            .map(|(i, text)| {
                let url = ids.get(i).map_or_else(
                    || format!("{base_url}/trending"),
                    |id| format!("{base_url}/video/{}", urlencoding::encode(id)),
                );
                TrendingPost { text, url }
            })
            .take(5)
            .collect()
    }

    /// Logs in and publishes a caption. The upload flow is opaque: any
    /// non-success response is a failure, no detail propagated beyond the
    /// error kind.
    pub async fn post(&self, content: &str) -> CollaboratorResult<()> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(CollaboratorError::ConfigMissing("TikTok credentials"));
        }

        let login_url = format!("{}/login", self.base_url);
        let response = self
            .client
            .post(&login_url)
            .form(&[
                ("username", self.username.as_str()),
                ("password", self.password.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CollaboratorError::UnexpectedResponse(format!(
                "login returned {}",
                response.status()
            )));
        }

        let upload_url = format!("{}/upload", self.base_url);
        let response = self
            .client
            .post(&upload_url)
            .form(&[("caption", content)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CollaboratorError::UnexpectedResponse(format!(
                "upload returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_posts_filters_short_captions() {
        let body = r#"
            {"id":"728000000001","desc":"ok"}
            {"id":"728000000002","desc":"How I make money online with one simple automation trick"}
        "#;
        let posts = TikTokClient::extract_posts("https://www.tiktok.com", body);
        assert_eq!(posts.len(), 1);
        assert!(posts[0].text.starts_with("How I make money"));
        assert_eq!(posts[0].url, "https://www.tiktok.com/video/728000000002");
    }

    #[test]
    fn test_extract_posts_caps_at_five() {
        let mut body = String::new();
        for i in 0..8 {
            body.push_str(&format!(
                r#"{{"id":"72800000000{i}","desc":"A sufficiently long trending caption number {i}"}}"#,
            ));
        }
        let posts = TikTokClient::extract_posts("https://www.tiktok.com", &body);
        assert_eq!(posts.len(), 5);
    }

    #[test]
    fn test_unescape_decodes_escapes_and_entities() {
        assert_eq!(
            unescape_json_string(r"line one\nhttps:\/\/x.y &amp; done"),
            "line one https://x.y & done"
        );
    }
}
