//! API Handlers
//!
//! HTTP request handlers mapping each endpoint onto a cache store operation.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::cache::{CacheStore, Ttl};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::StatusResponse;
use crate::tasks::Reaper;

/// Application state shared across all handlers.
///
/// The store carries its own lock, so handlers only need a shared reference.
#[derive(Clone)]
pub struct AppState {
    /// Byte-valued cache store
    pub cache: Arc<CacheStore>,
}

impl AppState {
    /// Creates a new AppState owning the given cache store.
    pub fn new(cache: CacheStore) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration and starts the store's reaper.
    ///
    /// The caller owns the returned reaper and is responsible for stopping it.
    pub fn from_config(config: &Config) -> (Self, Reaper) {
        let (cache, reaper) = CacheStore::with_reaper(
            config.default_ttl_duration(),
            config.reap_interval_duration(),
        );
        (Self { cache }, reaper)
    }
}

/// Handler for GET /cache/:key
///
/// Returns the raw stored bytes, or 404 when the key is missing or expired.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Vec<u8>> {
    let value = state.cache.get(&key).await;
    value.ok_or(CacheError::NotFound(key))
}

/// Handler for PUT /cache/:key
///
/// Stores the request body under the key with the default TTL.
pub async fn set_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Bytes,
) -> StatusCode {
    // Copy out of the shared request buffer before storing.
    state.cache.set(key, body.to_vec(), Ttl::Default).await;
    StatusCode::OK
}

/// Handler for DELETE /cache/:key
///
/// Succeeds whether or not the key existed.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> StatusCode {
    state.cache.delete(&key).await;
    StatusCode::OK
}

/// Handler for GET /status
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse::new(state.cache.count().await))
}
