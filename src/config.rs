// Configuration management

use anyhow::{Context, Result};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::models::ClientConfig;

/// Environment variable holding the provider credential.
pub const API_KEY_VAR: &str = "GOOGLE_AI_KEY";
/// Log filter directives, `info` when unset.
pub const LOG_VAR: &str = "RUST_LOG";
/// Optional listen address for the relay.
pub const BIND_VAR: &str = "STORYGEN_BIND";

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_PROVIDER_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing {0} environment variable")]
    MissingCredential(&'static str),
    #[error("Invalid {var} value {value:?}: {source}")]
    InvalidBindAddress {
        var: &'static str,
        value: String,
        source: std::net::AddrParseError,
    },
}

/// Startup settings of the relay binary.
#[derive(Clone)]
pub struct RelayConfig {
    pub api_key: String,
    pub model: String,
    pub provider_url: String,
    pub bind_addr: SocketAddr,
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("provider_url", &self.provider_url)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through `lookup`; an empty credential counts as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingCredential(API_KEY_VAR))?;

        let bind = lookup(BIND_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind
            .trim()
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidBindAddress {
                var: BIND_VAR,
                value: bind.clone(),
                source,
            })?;

        Ok(Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            provider_url: DEFAULT_PROVIDER_URL.to_string(),
            bind_addr,
        })
    }
}

pub fn log_filter() -> EnvFilter {
    log_filter_from(std::env::var(LOG_VAR).ok().as_deref())
}

fn log_filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
        .join("storygen");

    fs::create_dir_all(&config_dir).context("Failed to create config directory")?;

    Ok(config_dir)
}

pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.toml"))
}

pub fn get_log_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("storygen.log"))
}

pub fn load_config() -> Result<ClientConfig> {
    load_config_from(&get_config_path()?)
}

/// Read the form's config, writing the defaults on first run.
pub fn load_config_from(config_path: &Path) -> Result<ClientConfig> {
    if !config_path.exists() {
        let default_config = ClientConfig::default();
        save_config_to(config_path, &default_config)?;
        return Ok(default_config);
    }

    let contents = fs::read_to_string(config_path).context("Failed to read config file")?;

    let config: ClientConfig = toml::from_str(&contents).context("Failed to parse config file")?;

    Ok(config)
}

pub fn save_config_to(config_path: &Path, config: &ClientConfig) -> Result<()> {
    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(config_path, contents).context("Failed to write config file")?;

    Ok(())
}
