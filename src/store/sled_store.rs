//! Corpus persistence on the sled embedded database
//!
//! Documents live in the default tree keyed by the big-endian id, with the
//! object encoded as JSON so arbitrary payload fields survive a round trip.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use super::CorpusStore;
use crate::query::{select, QueryFilter, Sort};
use crate::types::{ClassificationObject, DocumentId};

/// Corpus storage backed by sled
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    /// Open or create the database under `data_dir`
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let db_path = data_dir.as_ref().join("corpus.sled");
        let db = sled::open(&db_path)
            .with_context(|| format!("Failed to open corpus database at {:?}", db_path))?;
        Ok(Self { db })
    }

    fn key(id: DocumentId) -> [u8; 8] {
        id.to_be_bytes()
    }

    fn decode(key: &[u8], data: &[u8]) -> Option<ClassificationObject> {
        match serde_json::from_slice(data) {
            Ok(object) => Some(object),
            Err(e) => {
                warn!("Skipping undecodable document at key {:?}: {}", key, e);
                None
            }
        }
    }

    /// Every decodable document in key order
    fn scan(&self) -> Result<Vec<ClassificationObject>> {
        let mut objects = Vec::new();
        for entry in self.db.iter() {
            let (key, data) = entry.context("Failed to read corpus database")?;
            if let Some(object) = Self::decode(&key, &data) {
                objects.push(object);
            }
        }
        Ok(objects)
    }

    /// Documents that could match `filter`; a pinned id needs a single lookup
    fn candidates(&self, filter: &QueryFilter) -> Result<Vec<ClassificationObject>> {
        match filter.pinned_id() {
            Some(id) => Ok(self.find_by_id(id)?.into_iter().collect()),
            None => self.scan(),
        }
    }

    pub fn len(&self) -> usize {
        self.db.len()
    }

    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }
}

impl CorpusStore for SledStore {
    fn find(&self, filter: &QueryFilter, limit: usize, sort: Sort) -> Result<Vec<ClassificationObject>> {
        Ok(select(self.candidates(filter)?, filter, limit, sort))
    }

    fn find_by_id(&self, id: DocumentId) -> Result<Option<ClassificationObject>> {
        let key = Self::key(id);
        let data = self
            .db
            .get(key)
            .with_context(|| format!("Failed to read document {}", id))?;
        Ok(data.and_then(|data| Self::decode(&key, &data)))
    }

    fn tags(&self) -> Result<Vec<String>> {
        let mut tags = BTreeSet::new();
        for object in self.scan()? {
            tags.extend(object.tags.unwrap_or_default());
        }
        Ok(tags.into_iter().collect())
    }

    fn save(&self, object: &ClassificationObject) -> Result<()> {
        let data = serde_json::to_vec(object)
            .with_context(|| format!("Failed to serialize document {}", object.id))?;
        self.db
            .insert(Self::key(object.id), data)
            .with_context(|| format!("Failed to store document {}", object.id))?;
        Ok(())
    }

    fn remove(&self, filter: &QueryFilter) -> Result<usize> {
        let mut removed = 0;
        for object in self.candidates(filter)? {
            if !filter.matches(&object) {
                continue;
            }
            if self
                .db
                .remove(Self::key(object.id))
                .with_context(|| format!("Failed to remove document {}", object.id))?
                .is_some()
            {
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn flush(&self) -> Result<()> {
        self.db.flush().context("Failed to flush corpus database")?;
        Ok(())
    }
}
