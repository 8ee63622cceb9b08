use std::time::Duration;

use axum::http::HeaderValue;
use config::{Config, ConfigError, Environment, File};
use secrecy::Secret;
use serde::Deserialize;

/// Process configuration, loaded once at bootstrap and passed down
/// explicitly. Nothing in the workspace reads the environment after this.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthServiceSetting {
    pub app: AppSettings,
    pub postgres: PostgresSettings,
    pub email_client: EmailClientSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    /// Socket address the service binds, e.g. "0.0.0.0:3000".
    pub address: String,
    /// Public base URL embedded in verification links.
    pub base_url: String,
    #[serde(default)]
    pub allowed_origins: AllowedOrigins,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    #[serde(default = "default_email_timeout_millis")]
    pub timeout_in_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

fn default_email_timeout_millis() -> u64 {
    10_000
}

impl AuthServiceSetting {
    /// Load settings from `config.{json,toml,...}` (optional) overlaid with
    /// `VOUCH__`-prefixed environment variables, e.g.
    /// `VOUCH__POSTGRES__URL`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("VOUCH").separator("__"))
            .build()?
            .try_deserialize()
    }
}

/// CORS allow-list for the dashboard frontend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|origin| self.0.iter().any(|allowed| allowed == origin))
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
