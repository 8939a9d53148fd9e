use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub automation: AutomationConfig,

    pub openai: OpenAiConfig,

    pub tiktok: TikTokConfig,

    pub instagram: InstagramConfig,

    #[serde(default = "default_products")]
    pub products: Vec<AffiliateProductConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/trendarr.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub enabled: bool,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 5170,
            cors_allowed_origins: vec![
                "http://localhost:5170".to_string(),
                "http://127.0.0.1:5170".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomationConfig {
    /// Start the posting loop automatically in daemon mode.
    pub autostart: bool,

    pub scan_interval_minutes: u32,

    pub cron_expression: Option<String>,

    /// Delay before the next iteration after an unhandled cycle fault.
    pub error_backoff_seconds: u32,

    /// Link appended to every generated caption.
    pub affiliate_link: String,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            autostart: false,
            scan_interval_minutes: 30,
            cron_expression: None,
            error_backoff_seconds: 60,
            affiliate_link: "bit.ly/your-link".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// Empty means unconfigured; the generator falls back to canned output.
    pub api_key: String,

    pub base_url: String,

    pub model: String,

    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TikTokConfig {
    pub base_url: String,

    pub username: String,

    pub password: String,

    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u32,
}

impl Default for TikTokConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.tiktok.com".to_string(),
            username: String::new(),
            password: String::new(),
            request_timeout_seconds: 30,
        }
    }
}

impl TikTokConfig {
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstagramConfig {
    pub base_url: String,

    pub username: String,

    pub password: String,
}

impl Default for InstagramConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.instagram.com".to_string(),
            username: String::new(),
            password: String::new(),
        }
    }
}

impl InstagramConfig {
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffiliateProductConfig {
    pub name: String,
    pub category: String,
    pub commission_rate: f64,
    pub commission_amount: f64,
    pub url: String,
    pub is_recurring: bool,
}

fn default_products() -> Vec<AffiliateProductConfig> {
    vec![
        AffiliateProductConfig {
            name: "Systeme.io".to_string(),
            category: "AI & Automation Tools".to_string(),
            commission_rate: 60.0,
            commission_amount: 162.0,
            url: "https://systeme.io/affiliate".to_string(),
            is_recurring: true,
        },
        AffiliateProductConfig {
            name: "ClickFunnels 2.0".to_string(),
            category: "AI & Automation Tools".to_string(),
            commission_rate: 40.0,
            commission_amount: 78.0,
            url: "https://clickfunnels.com/affiliates".to_string(),
            is_recurring: true,
        },
        AffiliateProductConfig {
            name: "Jasper AI".to_string(),
            category: "AI Content Creation".to_string(),
            commission_rate: 30.0,
            commission_amount: 45.0,
            url: "https://jasper.ai/affiliate".to_string(),
            is_recurring: true,
        },
        AffiliateProductConfig {
            name: "GetResponse".to_string(),
            category: "Email Marketing Automation".to_string(),
            commission_rate: 33.0,
            commission_amount: 90.0,
            url: "https://getresponse.com/affiliate".to_string(),
            is_recurring: true,
        },
        AffiliateProductConfig {
            name: "Legendary Marketer".to_string(),
            category: "High-Ticket Courses".to_string(),
            commission_rate: 60.0,
            commission_amount: 1550.0,
            url: "https://legendarymarketer.com/affiliate".to_string(),
            is_recurring: false,
        },
        AffiliateProductConfig {
            name: "ClickBank High-Ticket".to_string(),
            category: "High-Ticket Courses".to_string(),
            commission_rate: 62.0,
            commission_amount: 1350.0,
            url: "https://clickbank.com".to_string(),
            is_recurring: false,
        },
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            automation: AutomationConfig::default(),
            openai: OpenAiConfig::default(),
            tiktok: TikTokConfig::default(),
            instagram: InstagramConfig::default(),
            products: default_products(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                let mut config = Self::load_from_path(path)?;
                config.apply_env_overrides();
                return Ok(config);
            }
        }

        info!("No config file found, using defaults");
        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Credentials from the process environment win over the config file.
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.openai.api_key = key;
        }
        if let Ok(user) = std::env::var("TIKTOK_USERNAME") {
            self.tiktok.username = user;
        }
        if let Ok(pass) = std::env::var("TIKTOK_PASSWORD") {
            self.tiktok.password = pass;
        }
        if let Ok(user) = std::env::var("INSTAGRAM_USERNAME") {
            self.instagram.username = user;
        }
        if let Ok(pass) = std::env::var("INSTAGRAM_PASSWORD") {
            self.instagram.password = pass;
        }
    }

    /// Names of the credential variables that are still unset. Each missing
    /// entry disables the corresponding collaborator call.
    #[must_use]
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.openai.api_key.is_empty() {
            missing.push("OPENAI_API_KEY");
        }
        if self.tiktok.username.is_empty() {
            missing.push("TIKTOK_USERNAME");
        }
        if self.tiktok.password.is_empty() {
            missing.push("TIKTOK_PASSWORD");
        }
        if self.instagram.username.is_empty() {
            missing.push("INSTAGRAM_USERNAME");
        }
        if self.instagram.password.is_empty() {
            missing.push("INSTAGRAM_PASSWORD");
        }
        missing
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::default_config_path();
        self.save_to_path(&path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("trendarr").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".trendarr").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.automation.scan_interval_minutes == 0 && self.automation.cron_expression.is_none() {
            anyhow::bail!("Automation interval must be > 0 or cron expression must be set");
        }

        if self.automation.affiliate_link.is_empty() {
            anyhow::bail!("Affiliate link cannot be empty");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.automation.scan_interval_minutes, 30);
        assert_eq!(config.products.len(), 6);
        assert_eq!(config.tiktok.base_url, "https://www.tiktok.com");
        assert!(!config.tiktok.has_credentials());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[automation]"));
        assert!(toml_str.contains("[[products]]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [automation]
            scan_interval_minutes = 15
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.automation.scan_interval_minutes, 15);

        assert_eq!(config.openai.model, "gpt-4o");
    }

    #[test]
    fn test_missing_credentials_names_every_unset_var() {
        let config: Config = toml::from_str("").unwrap();
        let missing = config.missing_credentials();
        assert!(missing.contains(&"OPENAI_API_KEY"));
        assert!(missing.contains(&"TIKTOK_USERNAME"));
        assert_eq!(missing.len(), 5);
    }

    #[test]
    fn test_validate_rejects_zero_interval_without_cron() {
        let mut config = Config::default();
        config.automation.scan_interval_minutes = 0;
        assert!(config.validate().is_err());

        config.automation.cron_expression = Some("0 */30 * * * *".to_string());
        assert!(config.validate().is_ok());
    }
}
