//! HTTP API Route Definitions
//!
//! Defines the REST API routes for the corpus service.

use axum::{routing::get, Router};

use super::handlers::{self, AppState};

/// Create the API router with all routes
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/corpus",
            get(handlers::list_documents)
                .put(handlers::update_tags)
                .delete(handlers::delete_document),
        )
        .route("/corpus/tags", get(handlers::list_tags))
        .with_state(app_state)
}
