//! Document store configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which store implementation backs the corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Embedded on-disk database under `data_dir`
    Sled,
    /// Process-local map, lost on exit
    Memory,
}

/// Document store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store implementation
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,
    /// Data directory for persistence
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_backend() -> StorageBackend {
    StorageBackend::Sled
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".corpusd")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            data_dir: default_data_dir(),
        }
    }
}
