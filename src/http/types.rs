//! HTTP API Request/Response Types
//!
//! JSON-serializable types for the HTTP API.

use serde::{Deserialize, Serialize};

/// Retag response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateResponse {
    /// Always true; failures use an error response
    pub success: bool,
    /// Human-readable confirmation
    pub message: String,
    /// Tags now stored on the document (null when none were supplied)
    pub tags: Option<Vec<String>>,
}

/// Distinct tags response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagsResponse {
    /// Every tag in use, without duplicates
    pub tags: Vec<String>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }
}
