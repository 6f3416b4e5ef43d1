//! Error types for the archive service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::warn;

use crate::models::ErrorResponse;

// == Archive Error Enum ==
/// Unified error type for the archive service.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Key or field not present in the store
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Stored record outlived its TTL
    #[error("Key expired: {0}")]
    Expired(String),

    /// Bad query parameters or an unrepresentable date
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Store is full and eviction failed
    #[error("Cache full: {0}")]
    CacheFull(String),

    /// The search API failed or answered with garbage
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for ArchiveError {
    fn from(err: reqwest::Error) -> Self {
        ArchiveError::Upstream(err.to_string())
    }
}

impl From<serde_json::Error> for ArchiveError {
    fn from(err: serde_json::Error) -> Self {
        ArchiveError::Internal(format!("Corrupt cached payload: {}", err))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ArchiveError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ArchiveError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ArchiveError::Expired(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ArchiveError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ArchiveError::CacheFull(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            ArchiveError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            ArchiveError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        if status.is_server_error() {
            warn!(status = %status, error = %message, "Request failed");
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the archive service.
pub type Result<T> = std::result::Result<T, ArchiveError>;
