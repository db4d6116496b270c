use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub database: DatabaseConfig,

    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection string handed to the ORM, e.g. `sqlite:tamubook.db` or
    /// `sqlite::memory:`.
    pub url: String,

    pub max_connections: u32,

    pub min_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:tamubook.db".to_string(),
            max_connections: 5,
            min_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 key for access tokens. Override with `ACCESS_TOKEN_KEY`.
    pub access_token_key: String,

    /// HS256 key for refresh tokens. Override with `REFRESH_TOKEN_KEY`.
    pub refresh_token_key: String,

    pub access_token_ttl_seconds: i64,

    pub refresh_token_ttl_seconds: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_key: "tamubook-dev-access-key-change-me".to_string(),
            refresh_token_key: "tamubook-dev-refresh-key-change-me".to_string(),
            access_token_ttl_seconds: 1800,
            refresh_token_ttl_seconds: 30 * 24 * 60 * 60,
        }
    }
}

impl Config {
    /// Load `config.toml`, creating a default one when missing, then apply
    /// environment overrides for the secrets and the database url.
    pub fn load() -> Result<Self> {
        let mut config = if Path::new(CONFIG_PATH).exists() {
            let raw = std::fs::read_to_string(CONFIG_PATH)
                .with_context(|| format!("Failed to read {CONFIG_PATH}"))?;
            toml::from_str(&raw).with_context(|| format!("Failed to parse {CONFIG_PATH}"))?
        } else {
            Self::default()
        };

        if let Ok(key) = std::env::var("ACCESS_TOKEN_KEY") {
            config.auth.access_token_key = key;
        }
        if let Ok(key) = std::env::var("REFRESH_TOKEN_KEY") {
            config.auth.refresh_token_key = key;
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database.url = url;
        }

        Ok(config)
    }

    /// Write a commented default config file if none exists yet.
    pub fn create_default_if_missing() -> Result<()> {
        if Path::new(CONFIG_PATH).exists() {
            return Ok(());
        }

        let default = toml::to_string_pretty(&Self::default())
            .context("Failed to serialize default config")?;
        std::fs::write(CONFIG_PATH, default)
            .with_context(|| format!("Failed to write {CONFIG_PATH}"))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.auth.access_token_key.is_empty() || self.auth.refresh_token_key.is_empty() {
            anyhow::bail!("token signing keys must not be empty");
        }
        if self.auth.access_token_key == self.auth.refresh_token_key {
            anyhow::bail!("access and refresh token keys must differ");
        }
        if self.auth.access_token_key.contains("change-me")
            || self.auth.refresh_token_key.contains("change-me")
        {
            warn!("running with the default token signing keys; set ACCESS_TOKEN_KEY and REFRESH_TOKEN_KEY");
        }
        if self.auth.access_token_ttl_seconds <= 0 || self.auth.refresh_token_ttl_seconds <= 0 {
            anyhow::bail!("token TTLs must be positive");
        }
        if self.database.url.is_empty() {
            anyhow::bail!("database url must not be empty");
        }
        if self.database.max_connections == 0
            || self.database.min_connections > self.database.max_connections
        {
            anyhow::bail!("database pool sizes are inconsistent");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_equal_keys_are_rejected() {
        let mut config = Config::default();
        config.auth.refresh_token_key = config.auth.access_token_key.clone();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_ttl_is_rejected() {
        let mut config = Config::default();
        config.auth.access_token_ttl_seconds = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[server]\nport = 8080\n").unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.auth.access_token_ttl_seconds, 1800);
    }
}
