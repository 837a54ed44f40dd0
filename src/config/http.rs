//! HTTP API server configuration

use serde::{Deserialize, Serialize};

/// Default listen address for the corpus API
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8888";

/// HTTP API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Listen address for HTTP server (e.g., "0.0.0.0:8888")
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Enable CORS (useful for browser-based clients)
    #[serde(default)]
    pub cors_enabled: bool,
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            cors_enabled: false,
        }
    }
}
