//! Configuration for corpusd

mod http;
mod logging;
mod storage;

pub use http::{HttpConfig, DEFAULT_LISTEN_ADDR};
pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use storage::{StorageBackend, StorageConfig};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "corpusd.toml";

/// Main configuration for the corpus service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP API server configuration
    #[serde(default)]
    pub http: HttpConfig,
    /// Document store configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Anchor a relative `storage.data_dir` to the directory holding the
    /// config file, so `init` and `serve` agree on where data lives.
    pub fn resolve_data_dir(&mut self, config_path: &Path) {
        if self.storage.data_dir.is_relative() {
            if let Some(base) = config_path.parent() {
                self.storage.data_dir = base.join(&self.storage.data_dir);
            }
        }
    }

    /// Validate all configuration fields.
    ///
    /// Collects every error and reports them together.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        match self.http.listen_addr.parse::<SocketAddr>() {
            Ok(addr) if addr.port() == 0 => {
                errors.push("HTTP listen port must be between 1 and 65535, got 0".to_string());
            }
            Ok(_) => {}
            Err(_) => errors.push(format!(
                "HTTP listen address '{}' is not a valid socket address",
                self.http.listen_addr
            )),
        }

        if self.storage.backend == StorageBackend::Sled
            && self.storage.data_dir.as_os_str().is_empty()
        {
            errors.push("data_dir must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            );
        }
    }
}
