//! Expired Entry Reaper
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::cache::CacheStore;

// == Reaper Handle ==
/// Owning handle for a running reaper task.
///
/// The task keeps sweeping until [`stop`](Reaper::stop) is called or the
/// handle is dropped. A reaper created with a zero interval never runs.
#[derive(Debug)]
pub struct Reaper {
    stop_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Reaper {
    fn disabled() -> Self {
        Self {
            stop_tx: None,
            handle: None,
        }
    }

    /// Signals the task to stop. Calling this more than once is a no-op.
    pub fn stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            // The task may already be gone; nothing to signal then.
            let _ = stop_tx.send(());
        }
    }

    /// Returns true while the sweep loop is alive.
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stops the task and waits for it to exit.
    pub async fn shutdown(mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("Reaper task ended abnormally: {}", e);
            }
        }
    }
}

/// Spawns a task that calls [`CacheStore::delete_expired`] every `interval`.
///
/// The first sweep happens one full interval after spawning. A zero interval
/// returns an inert handle without spawning anything.
///
/// # Example
/// ```ignore
/// let store = Arc::new(CacheStore::<Vec<u8>>::new(Duration::from_secs(300)));
/// let mut reaper = spawn_reaper(store.clone(), Duration::from_secs(3));
/// // Later, during shutdown:
/// reaper.stop();
/// ```
pub fn spawn_reaper<V>(store: Arc<CacheStore<V>>, interval: Duration) -> Reaper
where
    V: Send + Sync + 'static,
{
    if interval.is_zero() {
        info!("Reaper disabled, expired entries are only hidden on read");
        return Reaper::disabled();
    }

    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        info!("Starting reaper with interval of {:?}", interval);

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = store.delete_expired().await;
                    if removed > 0 {
                        info!("Reaper: removed {} expired entries", removed);
                    } else {
                        debug!("Reaper: no expired entries found");
                    }
                }
                _ = &mut stop_rx => {
                    info!("Reaper stopped");
                    break;
                }
            }
        }
    });

    Reaper {
        stop_tx: Some(stop_tx),
        handle: Some(handle),
    }
}
