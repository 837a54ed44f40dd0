//! corpusd: HTTP access to a tagged classification corpus
//!
//! - List documents filtered by stemmed keywords, tags, or tagged/untagged state
//! - Replace the tags on a document
//! - Delete a document, optionally scoped to its current tags
//! - List the distinct tags in use
//!
//! Documents are held in a [`store::CorpusStore`]; keyword terms are reduced
//! with a [`stemming::Stemmer`] before matching.

pub mod config;
pub mod http;
pub mod query;
pub mod stemming;
pub mod store;
pub mod types;
pub mod util;

pub use config::Config;
pub use types::*;
