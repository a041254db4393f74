//! Permit data source client

use async_trait::async_trait;

use crate::error::UpstreamError;

#[cfg(test)]
pub mod fixtures;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod socrata;

pub use models::{PermitRecord, RawPermit, parse_cost, parse_timestamp};
pub use socrata::SocrataClient;

/// Upstream permit source.
///
/// The cache only ever talks to the data source through this trait, so tests
/// can substitute a scripted source.
#[async_trait]
pub trait PermitSource: Send + Sync {
    /// Fetch the full set of permits, already normalized.
    ///
    /// Records that cannot be normalized (missing coordinates) are dropped
    /// by the implementation and never reach the cache.
    async fn fetch_permits(&self) -> std::result::Result<Vec<PermitRecord>, UpstreamError>;

    /// Cheap reachability check; never errors, `false` means down.
    async fn probe(&self) -> bool;
}
