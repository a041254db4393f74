//! Query facade
//!
//! `PermitService` is the single entry point used by the CLI: every read goes
//! through the refresh coordinator and then the pure query engine.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::{CacheState, RecordStore, RefreshCoordinator};
use crate::client::{PermitRecord, PermitSource};
use crate::config::Config;
use crate::error::Result;
use crate::query::{self, CommunityStats, ContractorStats, QuerySpec, SummaryStats};

/// One page of a filtered listing
#[derive(Debug, Clone, Serialize)]
pub struct PermitPage {
    pub permits: Vec<PermitRecord>,
    /// Records in the snapshot
    pub total_count: usize,
    /// Records matching the filters, before pagination
    pub filtered_count: usize,
    pub limit: usize,
    pub offset: usize,
    pub cache_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommunityAnalytics {
    pub communities: Vec<CommunityStats>,
    pub cache_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContractorAnalytics {
    pub contractors: Vec<ContractorStats>,
    pub cache_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    #[serde(flatten)]
    pub stats: SummaryStats,
    pub cache_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshSummary {
    pub permits_count: usize,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UpstreamStatus {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    Loaded,
    Empty,
}

/// Health and freshness report; building it never triggers a refresh
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: String,
    pub upstream: UpstreamStatus,
    pub cache_status: CacheStatus,
    pub cache_state: CacheState,
    pub cache_stale: bool,
    pub permits_cached: usize,
    pub cache_updated: Option<DateTime<Utc>>,
    pub timestamp: DateTime<Utc>,
}

/// Facade over the cache and query engine
pub struct PermitService<S: PermitSource + 'static> {
    coordinator: RefreshCoordinator<S>,
    top_n: usize,
}

impl<S: PermitSource + 'static> PermitService<S> {
    /// Build a service using the TTL and ranking size from `config`
    pub fn new(source: S, config: &Config) -> Self {
        Self::with_settings(source, config.cache_ttl(), config.top_n)
    }

    pub fn with_settings(source: S, ttl: Duration, top_n: usize) -> Self {
        Self {
            coordinator: RefreshCoordinator::with_ttl(source, ttl),
            top_n,
        }
    }

    pub fn coordinator(&self) -> &RefreshCoordinator<S> {
        &self.coordinator
    }

    /// Filtered, paginated listing
    pub async fn list(&self, spec: &QuerySpec) -> Result<PermitPage> {
        spec.validate()?;
        let store = self.coordinator.ensure_fresh().await?;
        Ok(Self::page(&store, spec, Utc::now()))
    }

    fn page(store: &RecordStore, spec: &QuerySpec, now: DateTime<Utc>) -> PermitPage {
        let outcome = query::filter_at(store.records(), spec, now);
        PermitPage {
            permits: outcome.page.into_iter().cloned().collect(),
            total_count: outcome.total_count,
            filtered_count: outcome.filtered_count,
            limit: spec.pagination.limit,
            offset: spec.pagination.offset,
            cache_updated: store.fetched_at(),
        }
    }

    /// Look up a permit by exact permit number; `None` when absent
    pub async fn permit(&self, permit_num: &str) -> Result<Option<PermitRecord>> {
        let store = self.coordinator.ensure_fresh().await?;
        let found = store.find(permit_num).cloned();
        if found.is_none() {
            log::debug!("Permit {} not in cache ({} records)", permit_num, store.len());
        }
        Ok(found)
    }

    pub async fn community_analytics(&self) -> Result<CommunityAnalytics> {
        let store = self.coordinator.ensure_fresh().await?;
        Ok(CommunityAnalytics {
            communities: query::community_stats(store.records(), self.top_n),
            cache_updated: store.fetched_at(),
        })
    }

    pub async fn contractor_analytics(&self) -> Result<ContractorAnalytics> {
        let store = self.coordinator.ensure_fresh().await?;
        Ok(ContractorAnalytics {
            contractors: query::contractor_stats(store.records(), self.top_n),
            cache_updated: store.fetched_at(),
        })
    }

    /// Summary figures over every permit matching `spec`; pagination is ignored
    pub async fn summary(&self, spec: &QuerySpec) -> Result<SummaryReport> {
        spec.validate()?;
        let store = self.coordinator.ensure_fresh().await?;
        let now = Utc::now();
        let matches = query::matching_at(store.records(), spec, now);
        Ok(SummaryReport {
            stats: query::summarize(matches, now),
            cache_updated: store.fetched_at(),
        })
    }

    /// Force a refresh regardless of TTL
    pub async fn refresh(&self) -> Result<RefreshSummary> {
        let store = self.coordinator.force_refresh().await?;
        Ok(RefreshSummary {
            permits_count: store.len(),
            updated_at: store.fetched_at(),
        })
    }

    pub async fn health(&self) -> HealthReport {
        let upstream = if self.coordinator.source().probe().await {
            UpstreamStatus::Up
        } else {
            UpstreamStatus::Down
        };
        let snapshot = self.coordinator.snapshot().await;
        let cache_state = self.coordinator.state().await;

        HealthReport {
            status: "healthy".to_string(),
            upstream,
            cache_status: if snapshot.is_some() {
                CacheStatus::Loaded
            } else {
                CacheStatus::Empty
            },
            cache_state,
            cache_stale: snapshot
                .as_ref()
                .is_some_and(|s| !self.coordinator.is_fresh(s)),
            permits_cached: snapshot.as_ref().map_or(0, |s| s.len()),
            cache_updated: snapshot.as_ref().map(|s| s.fetched_at()),
            timestamp: Utc::now(),
        }
    }
}
