//! Refresh coordination
//!
//! `RefreshCoordinator` owns the published snapshot and guarantees that at most
//! one upstream fetch runs at a time. Callers arriving while a fetch is in
//! flight join it instead of starting another.
//!
//! The fetch itself runs on a spawned task that publishes its own result, so a
//! caller that gives up waiting (timeout, dropped request) never cancels a
//! refresh other callers are relying on.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::{BoxFuture, FutureExt, Shared};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};

use super::{DEFAULT_TTL, RecordStore};
use crate::client::PermitSource;
use crate::error::{Error, Result, UpstreamError};

type RefreshOutcome = std::result::Result<Arc<RecordStore>, UpstreamError>;
type SharedRefresh = Shared<BoxFuture<'static, RefreshOutcome>>;

/// Observable cache state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheState {
    /// Nothing has been fetched yet
    Empty,
    /// A refresh is in flight
    Fetching,
    /// Snapshot is younger than the TTL
    Fresh,
    /// Snapshot is older than the TTL
    Stale,
}

impl fmt::Display for CacheState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CacheState::Empty => "empty",
            CacheState::Fetching => "fetching",
            CacheState::Fresh => "fresh",
            CacheState::Stale => "stale",
        };
        write!(f, "{}", s)
    }
}

/// Single-flight refresh over a published `RecordStore`
pub struct RefreshCoordinator<S: PermitSource + 'static> {
    source: Arc<S>,
    ttl: Duration,
    /// Current generation; the lock is only held to clone or swap the `Arc`
    published: Arc<RwLock<Option<Arc<RecordStore>>>>,
    /// The refresh currently running, if any
    in_flight: Arc<Mutex<Option<SharedRefresh>>>,
}

impl<S: PermitSource + 'static> RefreshCoordinator<S> {
    /// Create a coordinator with the default one-hour TTL
    pub fn new(source: S) -> Self {
        Self::with_ttl(source, DEFAULT_TTL)
    }

    pub fn with_ttl(source: S, ttl: Duration) -> Self {
        Self {
            source: Arc::new(source),
            ttl,
            published: Arc::new(RwLock::new(None)),
            in_flight: Arc::new(Mutex::new(None)),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current snapshot without triggering any fetch
    pub async fn snapshot(&self) -> Option<Arc<RecordStore>> {
        self.published.read().await.clone()
    }

    pub async fn state(&self) -> CacheState {
        if self.in_flight.lock().await.is_some() {
            return CacheState::Fetching;
        }
        match self.snapshot().await {
            None => CacheState::Empty,
            Some(store) if self.is_fresh(&store) => CacheState::Fresh,
            Some(_) => CacheState::Stale,
        }
    }

    /// Whether `store` is younger than the TTL
    pub fn is_fresh(&self, store: &RecordStore) -> bool {
        // A negative age (clock moved backwards) counts as fresh.
        store
            .age_at(Utc::now())
            .to_std()
            .map(|age| age < self.ttl)
            .unwrap_or(true)
    }

    /// Return a snapshot, refreshing first if the current one is missing or stale.
    ///
    /// If the refresh fails and an older snapshot exists, the older snapshot is
    /// served. Fails with `Error::NoDataYet` only when nothing was ever loaded.
    pub async fn ensure_fresh(&self) -> Result<Arc<RecordStore>> {
        if let Some(store) = self.snapshot().await {
            if self.is_fresh(&store) {
                log::debug!("Cache hit ({} permits)", store.len());
                return Ok(store);
            }
            log::debug!("Cache stale (fetched {})", store.fetched_at());
        }

        match self.join_refresh(true).await {
            Ok(store) => Ok(store),
            Err(err) => match self.snapshot().await {
                Some(stale) => {
                    log::warn!(
                        "Refresh failed ({}); serving data fetched at {}",
                        err,
                        stale.fetched_at()
                    );
                    Ok(stale)
                }
                None => Err(Error::NoDataYet(err)),
            },
        }
    }

    /// Refresh regardless of TTL, joining any refresh already in flight.
    ///
    /// On failure the previous generation stays published and the error is
    /// returned as `Error::UpstreamUnavailable`.
    pub async fn force_refresh(&self) -> Result<Arc<RecordStore>> {
        Ok(self.join_refresh(false).await?)
    }

    /// Join the in-flight refresh or start one.
    ///
    /// With `reuse_fresh`, a snapshot published by a refresh that finished
    /// after the caller's own freshness check is returned instead of fetching
    /// again.
    async fn join_refresh(&self, reuse_fresh: bool) -> RefreshOutcome {
        let refresh = {
            let mut slot = self.in_flight.lock().await;
            match slot.as_ref() {
                Some(existing) => {
                    log::debug!("Joining in-flight refresh");
                    existing.clone()
                }
                None => {
                    if reuse_fresh {
                        let current = self.snapshot().await;
                        if let Some(store) = current.filter(|s| self.is_fresh(s)) {
                            return Ok(store);
                        }
                    }
                    let refresh = self.spawn_refresh();
                    *slot = Some(refresh.clone());
                    refresh
                }
            }
        };
        refresh.await
    }

    /// Start the fetch on its own task.
    ///
    /// Called with the in-flight slot locked; the task clears the slot when it
    /// finishes, which cannot happen before the caller has stored it.
    fn spawn_refresh(&self) -> SharedRefresh {
        let source = Arc::clone(&self.source);
        let published = Arc::clone(&self.published);
        let in_flight = Arc::clone(&self.in_flight);

        let handle = tokio::spawn(async move {
            log::info!("Refreshing permit data");
            let outcome = match source.fetch_permits().await {
                Ok(records) => {
                    let store = Arc::new(RecordStore::new(records, Utc::now()));
                    *published.write().await = Some(Arc::clone(&store));
                    log::info!("Cached {} permits", store.len());
                    Ok(store)
                }
                Err(err) => {
                    log::error!("Permit refresh failed: {}", err);
                    Err(err)
                }
            };
            in_flight.lock().await.take();
            outcome
        });

        async move {
            handle
                .await
                .unwrap_or_else(|e| Err(UpstreamError::Other(format!("refresh task failed: {}", e))))
        }
        .boxed()
        .shared()
    }
}
