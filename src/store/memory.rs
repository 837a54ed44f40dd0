//! In-process corpus store

use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;
use parking_lot::RwLock;

use super::CorpusStore;
use crate::query::{select, QueryFilter, Sort};
use crate::types::{ClassificationObject, DocumentId};

/// Corpus held in a map guarded by a read-write lock
#[derive(Default)]
pub struct MemoryStore {
    objects: RwLock<BTreeMap<DocumentId, ClassificationObject>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `objects`
    pub fn with_objects(objects: impl IntoIterator<Item = ClassificationObject>) -> Self {
        let map = objects.into_iter().map(|o| (o.id, o)).collect();
        Self {
            objects: RwLock::new(map),
        }
    }

    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }
}

impl CorpusStore for MemoryStore {
    fn find(&self, filter: &QueryFilter, limit: usize, sort: Sort) -> Result<Vec<ClassificationObject>> {
        let objects = self.objects.read();
        Ok(select(objects.values().cloned(), filter, limit, sort))
    }

    fn find_by_id(&self, id: DocumentId) -> Result<Option<ClassificationObject>> {
        Ok(self.objects.read().get(&id).cloned())
    }

    fn tags(&self) -> Result<Vec<String>> {
        let objects = self.objects.read();
        let tags: BTreeSet<&String> = objects.values().flat_map(|o| o.tag_list()).collect();
        Ok(tags.into_iter().cloned().collect())
    }

    fn save(&self, object: &ClassificationObject) -> Result<()> {
        self.objects.write().insert(object.id, object.clone());
        Ok(())
    }

    fn remove(&self, filter: &QueryFilter) -> Result<usize> {
        let mut objects = self.objects.write();
        let before = objects.len();
        objects.retain(|_, o| !filter.matches(o));
        Ok(before - objects.len())
    }
}
