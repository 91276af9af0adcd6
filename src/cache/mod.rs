//! Cache Module
//!
//! Provides the in-memory store with TTL expiration and snapshot persistence.

mod entry;
mod snapshot;
mod store;


// Re-export public types
pub use entry::{CacheEntry, Ttl};
pub use store::CacheStore;
