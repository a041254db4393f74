//! Mock permit source for testing
//!
//! Scripted implementation of `PermitSource` so the cache and service can be
//! exercised without network access.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{PermitRecord, PermitSource};
use crate::error::UpstreamError;

/// Mock permit source.
///
/// # Example
/// ```ignore
/// let mock = MockPermitSource::new()
///     .with_records(vec![PermitBuilder::new("BP1").build()])
///     .with_latency(Duration::from_millis(50));
///
/// let records = mock.fetch_permits().await?;
/// ```
#[derive(Clone)]
pub struct MockPermitSource {
    /// Records returned by every successful fetch
    records: Arc<Mutex<Vec<PermitRecord>>>,
    /// Errors returned by the next fetches, consumed in order
    errors: Arc<Mutex<VecDeque<UpstreamError>>>,
    /// Artificial fetch latency
    latency: Option<Duration>,
    /// Probe result
    probe_up: bool,
    call_count: Arc<Mutex<CallCounts>>,
}

/// Tracks call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub fetch_permits: usize,
    pub probe: usize,
}

impl Default for MockPermitSource {
    fn default() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            errors: Arc::new(Mutex::new(VecDeque::new())),
            latency: None,
            probe_up: true,
            call_count: Arc::new(Mutex::new(CallCounts::default())),
        }
    }
}

impl MockPermitSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(self, records: Vec<PermitRecord>) -> Self {
        // Builders run before the mock is shared, so the lock is uncontended.
        if let Ok(mut guard) = self.records.try_lock() {
            *guard = records;
        }
        self
    }

    /// Queue an error for the next fetch
    pub fn with_error(self, error: UpstreamError) -> Self {
        if let Ok(mut guard) = self.errors.try_lock() {
            guard.push_back(error);
        }
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn with_probe(mut self, up: bool) -> Self {
        self.probe_up = up;
        self
    }

    /// Replace the records served by later fetches
    pub async fn set_records(&self, records: Vec<PermitRecord>) {
        *self.records.lock().await = records;
    }

    /// Queue an error after construction
    pub async fn push_error(&self, error: UpstreamError) {
        self.errors.lock().await.push_back(error);
    }

    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }
}

#[async_trait]
impl PermitSource for MockPermitSource {
    async fn fetch_permits(&self) -> std::result::Result<Vec<PermitRecord>, UpstreamError> {
        self.call_count.lock().await.fetch_permits += 1;

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(err) = self.errors.lock().await.pop_front() {
            return Err(err);
        }

        Ok(self.records.lock().await.clone())
    }

    async fn probe(&self) -> bool {
        self.call_count.lock().await.probe += 1;
        self.probe_up
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::PermitBuilder;

    #[tokio::test]
    async fn test_mock_returns_records() {
        let mock = MockPermitSource::new().with_records(vec![PermitBuilder::new("BP1").build()]);

        let records = mock.fetch_permits().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(mock.call_counts().await.fetch_permits, 1);
    }

    #[tokio::test]
    async fn test_mock_errors_consumed_in_order() {
        let mock = MockPermitSource::new()
            .with_records(vec![PermitBuilder::new("BP1").build()])
            .with_error(UpstreamError::Timeout)
            .with_error(UpstreamError::Http("502".to_string()));

        assert_eq!(mock.fetch_permits().await.unwrap_err(), UpstreamError::Timeout);
        assert!(matches!(mock.fetch_permits().await, Err(UpstreamError::Http(_))));
        assert!(mock.fetch_permits().await.is_ok());
        assert_eq!(mock.call_counts().await.fetch_permits, 3);
    }

    #[tokio::test]
    async fn test_mock_probe() {
        let mock = MockPermitSource::new().with_probe(false);
        assert!(!mock.probe().await);
        assert_eq!(mock.call_counts().await.probe, 1);
    }
}
