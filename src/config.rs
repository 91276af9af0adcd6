//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default TTL in seconds for entries stored without an explicit TTL (0 = never expire)
    pub default_ttl: u64,
    /// Reaper sweep interval in seconds (0 = no background sweeping)
    pub reap_interval: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Snapshot file restored at startup and written on shutdown
    pub snapshot_path: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 1800)
    /// - `REAP_INTERVAL` - Reaper interval in seconds (default: 3)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SNAPSHOT_PATH` - Snapshot file path (default: unset, no persistence)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_ttl: parse_var("DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            reap_interval: parse_var("REAP_INTERVAL").unwrap_or(defaults.reap_interval),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            snapshot_path: env::var_os("SNAPSHOT_PATH")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Default TTL as a `Duration`.
    pub fn default_ttl_duration(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }

    /// Reaper interval as a `Duration`.
    pub fn reap_interval_duration(&self) -> Duration {
        Duration::from_secs(self.reap_interval)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl: 1800,
            reap_interval: 3,
            server_port: 3000,
            snapshot_path: None,
        }
    }
}
