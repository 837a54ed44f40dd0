//! Document store
//!
//! The HTTP layer talks to the corpus only through [`CorpusStore`]. Two
//! implementations ship with the crate: an embedded sled database and a
//! process-local map.

mod memory;
mod sled_store;

pub use memory::MemoryStore;
pub use sled_store::SledStore;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::{StorageBackend, StorageConfig};
use crate::query::{QueryFilter, Sort};
use crate::types::{ClassificationObject, DocumentId};

/// Persistence and query access to classification objects
pub trait CorpusStore: Send + Sync {
    /// Documents matching `filter`, ordered by `sort`, at most `limit` of them
    fn find(&self, filter: &QueryFilter, limit: usize, sort: Sort) -> Result<Vec<ClassificationObject>>;

    fn find_by_id(&self, id: DocumentId) -> Result<Option<ClassificationObject>>;

    /// Distinct tags across the corpus, sorted
    fn tags(&self) -> Result<Vec<String>>;

    /// Insert or replace an object by id
    fn save(&self, object: &ClassificationObject) -> Result<()>;

    /// Remove every document matching `filter`, returning how many went
    fn remove(&self, filter: &QueryFilter) -> Result<usize>;

    /// Flush buffered writes to durable storage
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// Open the store selected by configuration
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn CorpusStore>> {
    match config.backend {
        StorageBackend::Sled => {
            std::fs::create_dir_all(&config.data_dir).with_context(|| {
                format!("Failed to create data directory {}", config.data_dir.display())
            })?;
            let store = SledStore::open(&config.data_dir)?;
            info!("Opened sled corpus store in {}", config.data_dir.display());
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => {
            info!("Using in-memory corpus store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
