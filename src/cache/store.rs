//! Immutable permit snapshot

use chrono::{DateTime, Duration, Utc};

use crate::client::PermitRecord;

/// One published generation of permit data.
///
/// Never mutated after construction; readers share it through an `Arc`
/// and a refresh replaces the whole store.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<PermitRecord>,
    fetched_at: DateTime<Utc>,
}

impl RecordStore {
    pub fn new(records: Vec<PermitRecord>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            records,
            fetched_at,
        }
    }

    pub fn records(&self) -> &[PermitRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// When the upstream fetch that produced this snapshot completed
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        now - self.fetched_at
    }

    /// First record with an exactly matching permit number
    pub fn find(&self, permit_num: &str) -> Option<&PermitRecord> {
        self.records.iter().find(|r| r.permit_num == permit_num)
    }
}
