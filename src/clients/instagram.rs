use reqwest::Client;

use super::{CollaboratorError, CollaboratorResult};
use crate::config::InstagramConfig;

/// Instagram collaborator. Post-only; discovery runs against TikTok.
#[derive(Clone)]
pub struct InstagramClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl InstagramClient {
    pub fn new(config: &InstagramConfig, client: Client) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    pub async fn post(&self, content: &str) -> CollaboratorResult<()> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(CollaboratorError::ConfigMissing("Instagram credentials"));
        }

        let login_url = format!("{}/accounts/login/ajax/", self.base_url);
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

        let create_url = format!("{}/create/", self.base_url);
        let response = self
            .client
            .post(&create_url)
            .form(&[("caption", content)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CollaboratorError::UnexpectedResponse(format!(
                "create returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}
