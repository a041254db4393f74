//! Filter pipeline
//!
//! Predicates run in a fixed order: permit type, status, cost bounds,
//! community, work class, then the applied-date window. Pagination is applied
//! last, to the fully filtered list.

use chrono::{DateTime, Duration, Utc};

use super::{DateRange, QuerySpec};
use crate::client::PermitRecord;

/// Result of running a `QuerySpec` over a snapshot
#[derive(Debug, Clone)]
pub struct FilterOutcome<'a> {
    /// The requested page of matching records, in snapshot order
    pub page: Vec<&'a PermitRecord>,
    /// Records in the snapshot before filtering
    pub total_count: usize,
    /// Records matching every predicate, before pagination
    pub filtered_count: usize,
}

/// Apply `spec` against the current time
pub fn filter<'a>(records: &'a [PermitRecord], spec: &QuerySpec) -> FilterOutcome<'a> {
    filter_at(records, spec, Utc::now())
}

/// Apply `spec` with an explicit "now" for the date window
pub fn filter_at<'a>(
    records: &'a [PermitRecord],
    spec: &QuerySpec,
    now: DateTime<Utc>,
) -> FilterOutcome<'a> {
    let matches = matching_at(records, spec, now);
    let page = spec.pagination.slice(&matches).to_vec();

    FilterOutcome {
        page,
        total_count: records.len(),
        filtered_count: matches.len(),
    }
}

/// Every record passing the predicates of `spec`; pagination is ignored.
pub fn matching_at<'a>(
    records: &'a [PermitRecord],
    spec: &QuerySpec,
    now: DateTime<Utc>,
) -> Vec<&'a PermitRecord> {
    let permit_type = spec.permit_type.as_deref().map(str::to_lowercase);
    let community = spec.community.as_deref().map(str::to_lowercase);
    let cutoff = match spec.date_range {
        DateRange::All => None,
        // A cutoff before the earliest representable instant means no lower bound.
        DateRange::LastDays(days) => Some(
            Duration::try_days(i64::from(days))
                .and_then(|window| now.checked_sub_signed(window))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        ),
    };

    records
        .iter()
        .filter(|r| {
            permit_type
                .as_deref()
                .is_none_or(|needle| r.permit_type.to_lowercase().contains(needle))
        })
        .filter(|r| spec.status.as_deref().is_none_or(|s| r.status == s))
        .filter(|r| spec.min_cost.is_none_or(|min| r.estimated_cost >= min))
        .filter(|r| spec.max_cost.is_none_or(|max| r.estimated_cost <= max))
        .filter(|r| {
            community.as_deref().is_none_or(|needle| {
                r.community_name
                    .as_deref()
                    .unwrap_or_default()
                    .to_lowercase()
                    .contains(needle)
            })
        })
        .filter(|r| spec.work_class.as_deref().is_none_or(|w| r.work_class == w))
        .filter(|r| {
            // Records without a parsable applied date never fall inside a window.
            cutoff.is_none_or(|cutoff| r.applied_date.is_some_and(|applied| applied >= cutoff))
        })
        .collect()
}
