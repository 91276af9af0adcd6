//! TTL Cache server
//!
//! Serves a byte-valued TTL cache over HTTP, optionally persisting it to a
//! snapshot file across restarts.

use std::io::ErrorKind;
use std::net::SocketAddr;
use std::path::Path;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ttl_cache::api::create_router;
use ttl_cache::{AppState, CacheError, CacheStore, Config};

/// Main entry point for the cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create cache store and start its reaper
/// 4. Restore the snapshot file, if configured
/// 5. Serve the HTTP API on the configured port
/// 6. On SIGINT/SIGTERM: stop the reaper and write the snapshot
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttl_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TTL cache server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: default_ttl={}s, reap_interval={}s, port={}, snapshot={:?}",
        config.default_ttl, config.reap_interval, config.server_port, config.snapshot_path
    );

    let (state, reaper) = AppState::from_config(&config);

    if let Some(path) = &config.snapshot_path {
        restore_snapshot(&state.cache, path).await?;
    }

    let app = create_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    reaper.shutdown().await;

    if let Some(path) = &config.snapshot_path {
        state
            .cache
            .save_file(path)
            .await
            .with_context(|| format!("failed to save snapshot to {}", path.display()))?;
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Merges a previously saved snapshot into the store. A missing file is a
/// fresh start; any other failure aborts startup so the file is not
/// overwritten on shutdown.
async fn restore_snapshot(cache: &CacheStore, path: &Path) -> anyhow::Result<()> {
    match cache.load_file(path).await {
        Ok(_) => Ok(()),
        Err(CacheError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            info!("No snapshot at {}, starting empty", path.display());
            Ok(())
        }
        Err(e) => Err(e).with_context(|| format!("failed to load snapshot {}", path.display())),
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
