//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the cache and its HTTP boundary.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A live entry already exists for the key
    #[error("Item {0} already exists")]
    AlreadyExists(String),

    /// No live entry exists for the key
    #[error("Item {0} doesn't exist")]
    NotFound(String),

    /// Snapshot serialization failed
    #[error("Snapshot encoding failed: {0}")]
    Encode(#[source] bincode::Error),

    /// Snapshot deserialization failed
    #[error("Snapshot decoding failed: {0}")]
    Decode(#[source] bincode::Error),

    /// Underlying stream or file failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        // Only a miss is distinguishable to remote callers.
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
