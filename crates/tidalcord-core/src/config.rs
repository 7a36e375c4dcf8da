use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::TidalcordError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

pub const DISCORD_CLIENT_ID_VAR: &str = "DISCORD_CLIENT_ID";
pub const CLIENT_ID_VAR: &str = "CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "CLIENT_SECRET";

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub catalog: CatalogConfig,
    pub presence: PresenceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    pub poll_interval_secs: u64,
    pub player_process: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub api_base_url: String,
    pub token_url: String,
    pub country_code: String,
    pub popularity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceConfig {
    pub default_image_url: String,
}

impl AppConfig {
    /// Load config: the user file if it exists, otherwise the built-in defaults.
    pub fn load() -> Result<Self, TidalcordError> {
        let user_path = Self::config_path();
        if user_path.exists() {
            tracing::info!(path = %user_path.display(), "Loading user config");
            let user_str = std::fs::read_to_string(&user_path)?;
            Self::from_toml(&user_str)
        } else {
            Self::from_toml(DEFAULT_CONFIG)
        }
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, TidalcordError> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| TidalcordError::Config(e.to_string()))?;
        if config.general.poll_interval_secs == 0 {
            return Err(TidalcordError::Config(
                "general.poll_interval_secs must be at least 1".into(),
            ));
        }
        Ok(config)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.general.poll_interval_secs)
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "tidalcord")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

/// Secrets read from the environment once at startup.
#[derive(Clone)]
pub struct Credentials {
    /// Discord application id; numeric.
    pub discord_client_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self, TidalcordError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build credentials from any key lookup. Every value is required.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TidalcordError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| TidalcordError::Credentials(format!("{key} is not set")))
        };

        let discord_client_id = require(DISCORD_CLIENT_ID_VAR)?;
        if discord_client_id.parse::<u64>().is_err() {
            return Err(TidalcordError::Credentials(format!(
                "{DISCORD_CLIENT_ID_VAR} must be numeric"
            )));
        }

        Ok(Self {
            discord_client_id,
            client_id: require(CLIENT_ID_VAR)?,
            client_secret: require(CLIENT_SECRET_VAR)?,
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("discord_client_id", &self.discord_client_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}
