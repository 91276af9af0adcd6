//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing JSON response bodies.

use serde::Serialize;

/// Response body for the status endpoint (GET /status)
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    /// Number of stored entries, including expired ones not yet reaped
    pub count: usize,
}

impl StatusResponse {
    /// Creates a new StatusResponse
    pub fn new(count: usize) -> Self {
        Self { count }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
