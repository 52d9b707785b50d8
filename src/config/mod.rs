//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Environment variable naming the YAML configuration file
pub const CONFIG_PATH_ENV: &str = "FLAGGED_POSTS_CONFIG";

/// Process configuration for the API server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Interface to bind
    pub host: String,

    /// Port to listen on (overridden by `PORT`)
    pub port: u16,

    /// JSON document holding the record collection (overridden by `DATA_FILE`)
    pub data_file: PathBuf,

    /// Allow cross-origin requests from any origin
    pub cors: bool,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            data_file: PathBuf::from("mock-post.json"),
            cors: true,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
        Self::from_yaml_str(&content).with_context(|| format!("failed to parse {}", path))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load from the file named by `FLAGGED_POSTS_CONFIG` (defaults otherwise),
    /// then apply environment overrides
    pub fn load() -> Result<Self> {
        let config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `PORT` and `DATA_FILE` overrides from `lookup`
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .with_context(|| format!("invalid PORT '{}'", port))?;
        }

        if let Some(data_file) = lookup("DATA_FILE") {
            self.data_file = PathBuf::from(data_file);
        }

        Ok(self)
    }

    /// Socket address to bind
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
