//! HTTP API errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use super::types::ErrorResponse;
use crate::types::DocumentId;

/// Failure of a request handler
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing argument
    #[error("{0}")]
    BadRequest(String),

    /// Referenced document does not exist
    #[error("{0}")]
    NotFound(String),

    /// Store or serialization failure
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn document_not_found(id: DocumentId) -> Self {
        Self::NotFound(format!("Could not find document with id {}", id))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Internal(anyhow::Error::new(e).context("Failed to serialize response"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::BadRequest(message) => ErrorResponse::bad_request(message),
            Self::NotFound(message) => ErrorResponse::not_found(message),
            Self::Internal(e) => {
                error!("Request failed: {:#}", e);
                ErrorResponse::internal_error("Internal server error")
            }
        };
        (status, Json(body)).into_response()
    }
}
