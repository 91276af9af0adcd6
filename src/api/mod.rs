//! API Module
//!
//! HTTP handlers and routing for the cache server.
//!
//! # Endpoints
//! - `GET /cache/:key` - Fetch the raw value stored under a key
//! - `PUT /cache/:key` - Store the request body under a key
//! - `DELETE /cache/:key` - Delete a key
//! - `GET /status` - Report the number of stored entries

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
