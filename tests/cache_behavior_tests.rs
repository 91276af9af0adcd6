//! Integration Tests for Cache Behavior
//!
//! Exercises the store through its public API: expiry, reaping, concurrent
//! access and snapshot files.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use ttl_cache::{spawn_reaper, CacheError, CacheStore, Ttl};

fn store<V>() -> CacheStore<V> {
    CacheStore::new(Duration::from_secs(1800))
}

// == Expiry ==

#[tokio::test]
async fn test_lazy_expiry_without_reaper() {
    let store: CacheStore<&str> = store();

    store.set("a", "v", Ttl::After(Duration::from_millis(200))).await;
    assert_eq!(store.get("a").await, Some("v"));

    sleep(Duration::from_millis(350)).await;

    assert_eq!(store.get("a").await, None);
}

#[tokio::test]
async fn test_hello_expires_after_ttl() {
    let store: CacheStore<String> = store();

    store
        .set("k1", "hello".to_string(), Ttl::After(Duration::from_millis(500)))
        .await;
    assert_eq!(store.get("k1").await.as_deref(), Some("hello"));

    sleep(Duration::from_millis(600)).await;

    assert_eq!(store.get("k1").await, None);
}

#[tokio::test]
async fn test_reaper_sweep_updates_count() {
    let (store, reaper) =
        CacheStore::<String>::with_reaper(Duration::from_secs(1800), Duration::from_millis(200));
    assert!(reaper.is_running());

    store
        .set("short", "v".to_string(), Ttl::After(Duration::from_millis(50)))
        .await;
    store.set("long", "v".to_string(), Ttl::Never).await;
    assert_eq!(store.count().await, 2);

    // Entry expires at ~50ms; the sweep at ~200ms must remove it without a read.
    sleep(Duration::from_millis(350)).await;

    assert_eq!(store.count().await, 1);
    assert_eq!(store.get("long").await.as_deref(), Some("v"));
    reaper.shutdown().await;
}

#[tokio::test]
async fn test_stopped_reaper_no_longer_sweeps() {
    let store: Arc<CacheStore<String>> = Arc::new(store());
    let mut reaper = spawn_reaper(Arc::clone(&store), Duration::from_millis(50));

    reaper.stop();
    reaper.stop();
    store
        .set("short", "v".to_string(), Ttl::After(Duration::from_millis(10)))
        .await;

    sleep(Duration::from_millis(200)).await;

    assert!(!reaper.is_running());
    assert_eq!(store.count().await, 1);
    assert_eq!(store.delete_expired().await, 1);
    assert_eq!(store.count().await, 0);
}

// == Flush ==

#[tokio::test]
async fn test_flush_ten_entries() {
    let store: CacheStore<usize> = store();
    for i in 0..10 {
        store.set(format!("key{}", i), i, Ttl::Default).await;
    }

    store.flush().await;

    assert_eq!(store.count().await, 0);
    for i in 0..10 {
        assert_eq!(store.get(&format!("key{}", i)).await, None);
    }
}

// == Concurrency ==

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_single_winner() {
    let store: Arc<CacheStore<usize>> = Arc::new(store());

    let handles: Vec<_> = (0..64)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.add("contended", i, Ttl::Default).await })
        })
        .collect();

    let mut succeeded = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => succeeded += 1,
            Err(e) => assert!(matches!(e, CacheError::AlreadyExists(_))),
        }
    }

    assert_eq!(succeeded, 1);
    assert_eq!(store.count().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writers_keep_count_consistent() {
    let store: Arc<CacheStore<String>> = Arc::new(store());

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                for i in 0..200 {
                    let key = format!("key{}", i % 50);
                    match (worker + i) % 3 {
                        0 => store.set(key, format!("{}-{}", worker, i), Ttl::Default).await,
                        1 => {
                            store.delete(&key).await;
                        }
                        _ => {
                            let _ = store.get(&key).await;
                        }
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    let mut live = 0;
    for i in 0..50 {
        if store.get(&format!("key{}", i)).await.is_some() {
            live += 1;
        }
    }
    assert_eq!(store.count().await, live);
}

// == Snapshot Files ==

#[tokio::test]
async fn test_snapshot_file_restores_into_fresh_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.snapshot");

    let source: CacheStore<Vec<u8>> = store();
    source.set("a", b"x".to_vec(), Ttl::Never).await;
    source.set("b", b"y".to_vec(), Ttl::Default).await;
    source.save_file(&path).await.unwrap();

    let target: CacheStore<Vec<u8>> = store();
    assert_eq!(target.load_file(&path).await.unwrap(), 2);

    assert_eq!(target.get("a").await, Some(b"x".to_vec()));
    assert_eq!(target.get("b").await, Some(b"y".to_vec()));
}

#[tokio::test]
async fn test_snapshot_file_does_not_clobber_live_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.snapshot");

    let source: CacheStore<String> = store();
    source.set("a", "x1".to_string(), Ttl::Never).await;
    source.save_file(&path).await.unwrap();

    let target: CacheStore<String> = store();
    target.set("a", "x2".to_string(), Ttl::Never).await;
    assert_eq!(target.load_file(&path).await.unwrap(), 0);

    assert_eq!(target.get("a").await.as_deref(), Some("x2"));
}

#[tokio::test]
async fn test_save_file_overwrites_previous_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.snapshot");

    let source: CacheStore<String> = store();
    source.set("old", "1".to_string(), Ttl::Never).await;
    source.save_file(&path).await.unwrap();

    source.flush().await;
    source.set("new", "2".to_string(), Ttl::Never).await;
    source.save_file(&path).await.unwrap();

    let target: CacheStore<String> = store();
    target.load_file(&path).await.unwrap();
    assert_eq!(target.get("old").await, None);
    assert_eq!(target.get("new").await.as_deref(), Some("2"));
}

#[tokio::test]
async fn test_load_file_rejects_truncated_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.snapshot");

    let source: CacheStore<String> = store();
    source.set("key", "value".to_string(), Ttl::Never).await;
    source.save_file(&path).await.unwrap();

    let bytes = std::fs::read(&path).unwrap();
    std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

    let target: CacheStore<String> = store();
    let result = target.load_file(&path).await;
    assert!(matches!(result, Err(CacheError::Decode(_))));
    assert!(target.is_empty().await);
}
