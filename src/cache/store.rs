//! Cache Store Module
//!
//! Main cache engine: a single reader/writer lock around a HashMap of entries,
//! with lazy expiry on read and bulk removal for the reaper.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheEntry, Ttl};
use crate::error::{CacheError, Result};
use crate::tasks::{spawn_reaper, Reaper};

// == Entries ==
/// Entry map plus its redundant length counter. Only reachable through the lock.
#[derive(Debug)]
pub(crate) struct Entries<V> {
    pub(crate) map: HashMap<String, CacheEntry<V>>,
    count: usize,
}

impl<V> Entries<V> {
    fn new() -> Self {
        Self {
            map: HashMap::with_capacity(256),
            count: 0,
        }
    }

    /// Inserts or overwrites, bumping the counter only for new keys.
    pub(crate) fn insert(&mut self, key: String, entry: CacheEntry<V>) {
        if self.map.insert(key, entry).is_none() {
            self.count += 1;
        }
    }

    fn remove(&mut self, key: &str) -> bool {
        let removed = self.map.remove(key).is_some();
        if removed {
            self.count -= 1;
        }
        removed
    }

    fn live(&self, key: &str) -> Option<&CacheEntry<V>> {
        self.map.get(key).filter(|entry| !entry.is_expired())
    }
}

// == Cache Store ==
/// Concurrent key/value store with per-entry TTL.
///
/// Mutations take the write lock for their whole duration; `get` and `count`
/// share the read lock. `add` and `update` check and mutate inside a single
/// critical section.
#[derive(Debug)]
pub struct CacheStore<V = Vec<u8>> {
    pub(crate) entries: RwLock<Entries<V>>,
    default_ttl: Duration,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store. A zero `default_ttl` means entries stored with
    /// [`Ttl::Default`] never expire.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(Entries::new()),
            default_ttl,
        }
    }

    /// Creates a shared store and starts its reaper.
    ///
    /// A zero `reap_interval` leaves the reaper inert, so only lazy expiry
    /// applies. Must be called from within a Tokio runtime.
    pub fn with_reaper(default_ttl: Duration, reap_interval: Duration) -> (Arc<Self>, Reaper)
    where
        V: Send + Sync + 'static,
    {
        let store = Arc::new(Self::new(default_ttl));
        let reaper = spawn_reaper(Arc::clone(&store), reap_interval);
        (store, reaper)
    }

    /// Returns the TTL applied for [`Ttl::Default`].
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    fn entry(&self, value: V, ttl: Ttl) -> CacheEntry<V> {
        CacheEntry::new(value, ttl.resolve(self.default_ttl))
    }

    // == Set ==
    /// Stores a value, overwriting any existing entry and resetting its TTL.
    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Ttl) {
        let entry = self.entry(value, ttl);
        self.entries.write().await.insert(key.into(), entry);
    }

    // == Add ==
    /// Stores a value only if no live entry exists for the key.
    ///
    /// An expired entry that has not been reaped yet is overwritten.
    pub async fn add(&self, key: impl Into<String>, value: V, ttl: Ttl) -> Result<()> {
        let key = key.into();
        let mut entries = self.entries.write().await;
        if entries.live(&key).is_some() {
            return Err(CacheError::AlreadyExists(key));
        }
        entries.insert(key, self.entry(value, ttl));
        Ok(())
    }

    // == Update ==
    /// Replaces the value of a live entry. Never creates a key.
    pub async fn update(&self, key: impl Into<String>, value: V, ttl: Ttl) -> Result<()> {
        let key = key.into();
        let mut entries = self.entries.write().await;
        if entries.live(&key).is_none() {
            return Err(CacheError::NotFound(key));
        }
        entries.insert(key, self.entry(value, ttl));
        Ok(())
    }

    // == Get ==
    /// Returns a clone of the value if the key is present and not expired.
    ///
    /// Expired entries read as absent but stay in place until deleted or reaped.
    pub async fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        let entries = self.entries.read().await;
        entries.live(key).map(|entry| entry.value.clone())
    }

    // == Delete ==
    /// Removes the entry for `key`, returning whether one was present.
    pub async fn delete(&self, key: &str) -> bool {
        self.entries.write().await.remove(key)
    }

    // == Delete Expired ==
    /// Removes every expired entry. Returns the number of entries removed.
    pub async fn delete_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.map.len();
        entries.map.retain(|_, entry| !entry.is_expired());
        let removed = before - entries.map.len();
        entries.count -= removed;
        removed
    }

    // == Count ==
    /// Returns the number of stored entries, including expired ones not yet reaped.
    pub async fn count(&self) -> usize {
        self.entries.read().await.count
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.count().await == 0
    }

    // == Flush ==
    /// Removes every entry.
    pub async fn flush(&self) {
        let mut entries = self.entries.write().await;
        debug!(removed = entries.count, "Flushing cache");
        entries.map.clear();
        entries.count = 0;
    }
}
