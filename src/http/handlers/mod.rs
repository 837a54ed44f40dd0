//! HTTP API Request Handlers
//!
//! Handlers that map HTTP requests to corpus store operations.

mod corpus;
mod tags;

use std::sync::Arc;

use crate::stemming::Stemmer;
use crate::store::CorpusStore;

/// Result count when a list request gives no `limit`
pub const DEFAULT_LIMIT: i64 = 10;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CorpusStore>,
    pub stemmer: Arc<dyn Stemmer>,
}

impl AppState {
    pub fn new(store: Arc<dyn CorpusStore>, stemmer: Arc<dyn Stemmer>) -> Self {
        Self { store, stemmer }
    }
}

pub use corpus::{delete_document, list_documents, list_filter, update_tags};
pub use tags::list_tags;
