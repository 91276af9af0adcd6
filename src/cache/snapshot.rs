//! Snapshot Persistence
//!
//! Saves the whole entry map to a binary stream with bincode and merges a
//! saved map back into a live store.

use std::collections::HashMap;
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::cache::{CacheEntry, CacheStore};
use crate::error::{CacheError, Result};

impl<V> CacheStore<V> {
    // == Save ==
    /// Writes every stored entry, expired or not, to `writer`.
    ///
    /// The read lock is held until the bytes are flushed, so the snapshot is a
    /// consistent point-in-time copy. Returns the number of entries written.
    pub async fn save<W>(&self, writer: &mut W) -> Result<usize>
    where
        V: Serialize,
        W: AsyncWrite + Unpin,
    {
        let entries = self.entries.read().await;
        let bytes = bincode::serialize(&entries.map).map_err(CacheError::Encode)?;

        writer.write_all(&bytes).await?;
        writer.flush().await?;

        debug!(
            entries = entries.map.len(),
            bytes = bytes.len(),
            "Snapshot written"
        );
        Ok(entries.map.len())
    }

    // == Load ==
    /// Reads a snapshot from `reader` and merges it into the store.
    ///
    /// A loaded entry only replaces a missing or expired one; live entries are
    /// kept. Returns the number of loaded entries that were applied.
    pub async fn load<R>(&self, reader: &mut R) -> Result<usize>
    where
        V: DeserializeOwned,
        R: AsyncRead + Unpin,
    {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        let loaded: HashMap<String, CacheEntry<V>> =
            bincode::deserialize(&bytes).map_err(CacheError::Decode)?;

        let total = loaded.len();
        let mut entries = self.entries.write().await;
        let mut applied = 0;
        for (key, entry) in loaded {
            let replace = entries
                .map
                .get(&key)
                .map_or(true, |current| current.is_expired());
            if replace {
                entries.insert(key, entry);
                applied += 1;
            }
        }

        debug!(total, applied, "Snapshot merged");
        Ok(applied)
    }

    // == Save File ==
    /// Saves a snapshot to `path`, creating or truncating the file.
    ///
    /// The file is synced before returning so late write errors surface here.
    /// If saving failed, that error is returned even when syncing also fails.
    pub async fn save_file(&self, path: impl AsRef<Path>) -> Result<usize>
    where
        V: Serialize,
    {
        let path = path.as_ref();
        let mut file = File::create(path).await?;

        let saved = self.save(&mut file).await;
        let synced = file.sync_all().await.map_err(CacheError::from);
        let count = saved.and_then(|count| synced.map(|()| count))?;

        info!("Saved {} entries to {}", count, path.display());
        Ok(count)
    }

    // == Load File ==
    /// Loads and merges a snapshot from `path`.
    pub async fn load_file(&self, path: impl AsRef<Path>) -> Result<usize>
    where
        V: DeserializeOwned,
    {
        let path = path.as_ref();
        let mut file = File::open(path).await?;

        let applied = self.load(&mut file).await?;

        info!("Loaded {} entries from {}", applied, path.display());
        Ok(applied)
    }
}
