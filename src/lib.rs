//! TTL Cache - An in-process key/value cache
//!
//! Provides a concurrent store with per-entry TTL, a background reaper for
//! expired entries, binary snapshot persistence, and a small HTTP front end.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheStore, Ttl};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::{spawn_reaper, Reaper};
