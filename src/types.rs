//! Core types for the corpus

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::stemming::Stemmer;

/// Identifier of a classification object
pub type DocumentId = i64;

/// A stored corpus entry: tags, stemmed keywords and classification payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationObject {
    pub id: DocumentId,
    /// Lowercase labels. `Some(vec![])` is untagged; `None` is an explicit
    /// null left behind by a retag request that supplied no tags.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Lowercase stemmed keyword terms
    #[serde(default)]
    pub stemmed_keywords: Vec<String>,
    pub last_modified: DateTime<Utc>,
    /// Classification fields carried through to the dictionary projection
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl ClassificationObject {
    /// Create an untagged object modified now
    pub fn new(id: DocumentId) -> Self {
        Self {
            id,
            tags: Some(Vec::new()),
            stemmed_keywords: Vec::new(),
            last_modified: Utc::now(),
            payload: Map::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(|t| t.into().to_lowercase()).collect());
        self
    }

    /// Set keywords, stemming each one
    pub fn with_keywords<I, S>(mut self, words: I, stemmer: &dyn Stemmer) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stemmed_keywords = words
            .into_iter()
            .map(|w| stemmer.stem(&w.as_ref().to_lowercase()))
            .collect();
        self
    }

    pub fn with_last_modified(mut self, last_modified: DateTime<Utc>) -> Self {
        self.last_modified = last_modified;
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Tags as a slice; a null tag field reads as empty
    pub fn tag_list(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    /// Mark as modified now
    pub fn touch(&mut self) {
        self.last_modified = Utc::now();
    }

    /// JSON dictionary projection served to clients.
    ///
    /// Timestamps are rendered as RFC 3339 strings; payload fields sit
    /// alongside the core attributes.
    pub fn to_dict(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
