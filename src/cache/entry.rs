//! Cache Entry Module
//!
//! Defines individual cache entries and the TTL selector used when storing them.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

// == TTL Selector ==
/// How long a stored entry should live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ttl {
    /// Use the store's configured default TTL.
    #[default]
    Default,
    /// Never expire.
    Never,
    /// Expire after the given duration. A zero duration means `Default`.
    After(Duration),
}

impl Ttl {
    // == Resolve ==
    /// Resolves this selector against a store default into a concrete lifetime.
    ///
    /// Returns `None` when the entry should never expire.
    pub fn resolve(self, default_ttl: Duration) -> Option<Duration> {
        let ttl = match self {
            Ttl::Never => return None,
            Ttl::After(d) if !d.is_zero() => d,
            Ttl::After(_) | Ttl::Default => default_ttl,
        };
        (!ttl.is_zero()).then_some(ttl)
    }
}

impl From<Duration> for Ttl {
    fn from(ttl: Duration) -> Self {
        Ttl::After(ttl)
    }
}

// == Cache Entry ==
/// Represents a single cache entry with its payload and expiration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry living for `ttl`, or forever when `None`.
    pub fn new(value: V, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|ttl| {
            let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
            current_timestamp_ms().saturating_add(ttl_ms)
        });

        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is strictly past its
    /// expiration timestamp. Entries without one never expire.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    fn is_expired_at(&self, now_ms: u64) -> bool {
        match self.expires_at {
            Some(expires) => now_ms > expires,
            None => false,
        }
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
