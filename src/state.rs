use std::sync::Arc;
use tokio::sync::RwLock;

use crate::automation::AutomationState;
use crate::clients::instagram::InstagramClient;
use crate::clients::openai::OpenAiClient;
use crate::clients::tiktok::TikTokClient;
use crate::config::Config;
use crate::db::Store;

/// Build a shared HTTP client with reasonable defaults for collaborator
/// calls. Reused across all HTTP-based clients to enable connection
/// pooling and avoid socket exhaustion.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent("Trendarr/1.0")
        .cookie_store(true)
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

/// Everything the API handlers and the automation loop share. The
/// automation counters live behind a single lock so reads from request
/// handlers never race with the loop's writes.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    /// Present only when an API key is configured; callers fall back to
    /// canned output otherwise.
    pub openai: Option<Arc<OpenAiClient>>,

    pub tiktok: Arc<TikTokClient>,

    pub instagram: Arc<InstagramClient>,

    pub automation: Arc<RwLock<AutomationState>>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let http_client =
            build_shared_http_client(config.tiktok.request_timeout_seconds.into())?;

        let openai = if config.openai.api_key.is_empty() {
            None
        } else {
            let timeout = std::time::Duration::from_secs(
                config.openai.request_timeout_seconds.into(),
            );
            let client = reqwest::Client::builder()
                .timeout(timeout)
                .user_agent("Trendarr/1.0")
                .build()
                .map_err(|e| anyhow::anyhow!("Failed to build OpenAI HTTP client: {e}"))?;
            Some(Arc::new(OpenAiClient::new(&config.openai, client)))
        };

        let tiktok = Arc::new(TikTokClient::new(&config.tiktok, http_client.clone()));
        let instagram = Arc::new(InstagramClient::new(&config.instagram, http_client));

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            openai,
            tiktok,
            instagram,
            automation: Arc::new(RwLock::new(AutomationState::default())),
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
