//! HTTP API Server Module
//!
//! REST access to the corpus: list and filter documents, retag or delete a
//! document, and list the tags in use.

pub mod args;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use handlers::AppState;
pub use routes::create_router;
pub use server::HttpServer;
