//! Configuration loading for Atlas.
//! Reads atlas.toml from the current directory or the path in ATLAS_CONFIG,
//! then applies ATLAS_* environment overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_CONFIG_FILE: &str = "atlas.toml";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16    { 3000 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Load `ws_…` routes with `GET /api/workspace/{id}` instead of re-creating.
    #[serde(default)]
    pub fetch_by_id: bool,
    /// Unset or 0 means requests may wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String { DEFAULT_BACKEND_URL.to_string() }

impl Default for BackendConfig {
    fn default() -> Self {
        Self { base_url: default_base_url(), fetch_by_id: false, timeout_secs: None }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    #[serde(default = "default_prompt_chips")]
    pub prompt_chips: Vec<String>,
}

fn default_prompt_chips() -> Vec<String> {
    vec![
        "Plan a Japan trip focused on food & affordability".to_string(),
        "Find a gym routine for beginners".to_string(),
        "Choose a laptop for CS student under $900".to_string(),
        "Build a 4-week React learning plan".to_string(),
    ]
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { prompt_chips: default_prompt_chips() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            backend: BackendConfig::default(),
            ui: UiConfig::default(),
        }
    }
}


impl Config {
    /// Load configuration.
    /// ATLAS_CONFIG must name an existing file when set; otherwise atlas.toml is
    /// read if present and defaults are used if not.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("ATLAS_CONFIG") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            Err(_) => {
                debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                Self::default()
            }
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        info!(path, "Configuration file loaded");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply ATLAS_* overrides. `lookup` is `std::env::var` in production.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("ATLAS_BACKEND_URL") {
            self.backend.base_url = url;
        }
        if let Some(host) = lookup("ATLAS_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("ATLAS_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("ATLAS_PORT is not a port: {port}")))?;
        }
        if let Some(flag) = lookup("ATLAS_FETCH_BY_ID") {
            self.backend.fetch_by_id = parse_bool(&flag).ok_or_else(|| {
                ConfigError::Invalid(format!("ATLAS_FETCH_BY_ID is not a boolean: {flag}"))
            })?;
        }
        if let Some(secs) = lookup("ATLAS_BACKEND_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("ATLAS_BACKEND_TIMEOUT_SECS is not a number: {secs}"))
            })?;
            self.backend.timeout_secs = (secs > 0).then_some(secs);
        }
        Ok(())
    }

    /// Check invariants and normalise the backend URL (no trailing slash).
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        let url = self.backend.base_url.trim().trim_end_matches('/');
        if url.is_empty() {
            return Err(ConfigError::Invalid("backend.base_url is empty".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "backend.base_url must start with http:// or https://, got {url}"
            )));
        }
        self.backend.base_url = url.to_string();
        if self.backend.timeout_secs == Some(0) {
            self.backend.timeout_secs = None;
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on"  => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
