//! Background Tasks Module
//!
//! Contains background tasks that run alongside the cache.
//!
//! # Tasks
//! - Reaper: Removes expired cache entries at a fixed interval

mod reaper;

pub use reaper::{spawn_reaper, Reaper};
