//! Response models for the cache server API
//!
//! Defines the DTOs serialized into JSON response bodies. Cached values
//! themselves travel as raw bytes and need no model.

pub mod responses;

pub use responses::{ErrorResponse, StatusResponse};
