//! In-memory permit cache
//!
//! Holds the most recently fetched generation of permits and coordinates
//! refreshes so that concurrent callers share a single upstream fetch.

pub mod coordinator;
pub mod store;

use std::time::Duration;

/// Default lifetime of a fetched snapshot
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60); // 1 hr

pub use coordinator::{CacheState, RefreshCoordinator};
pub use store::RecordStore;
