//! Tag listing handler

use axum::{extract::State, Json};

use super::AppState;
use crate::http::error::ApiError;
use crate::http::types::TagsResponse;

/// Distinct tags endpoint
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<TagsResponse>, ApiError> {
    let tags = state.store.tags()?;
    Ok(Json(TagsResponse { tags }))
}
