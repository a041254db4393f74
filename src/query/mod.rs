//! Query engine over a cached permit snapshot
//!
//! A `QuerySpec` describes which permits a caller wants; `filter` applies it
//! and `analytics` computes grouped views. Everything here is pure: it reads a
//! slice of records and never touches the cache or the network.

pub mod analytics;
pub mod filter;
pub mod pagination;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

pub use analytics::{
    CommunityStats, ContractorStats, DEFAULT_TOP_N, SummaryStats, community_stats,
    contractor_stats, summarize,
};
pub use filter::{FilterOutcome, filter, filter_at, matching_at};
pub use pagination::{DEFAULT_LIMIT, Pagination};

/// Longest accepted `LastDays` window (a century)
pub const MAX_DATE_RANGE_DAYS: u32 = 36_500;

/// Window on a permit's applied date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    /// No date constraint
    #[default]
    All,
    /// Applied within the last N days, inclusive of the cutoff instant
    LastDays(u32),
}

impl FromStr for DateRange {
    type Err = Error;

    /// Accepts `all` or `<N>days` (e.g. `30days`), case-insensitive.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        if normalized.is_empty() || normalized == "all" {
            return Ok(DateRange::All);
        }

        normalized
            .strip_suffix("days")
            .and_then(|n| n.trim().parse::<u32>().ok())
            .filter(|n| *n > 0)
            .map(DateRange::LastDays)
            .ok_or_else(|| {
                Error::InvalidQuery(format!(
                    "unknown date range '{}' (expected 'all' or e.g. '30days')",
                    s
                ))
            })
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateRange::All => write!(f, "all"),
            DateRange::LastDays(n) => write!(f, "{}days", n),
        }
    }
}

/// Filter and pagination request.
///
/// Absent predicates do not constrain. Blank strings are treated as absent.
///
/// # Example
/// ```ignore
/// let spec = QuerySpec::new()
///     .status("Issued Permit")
///     .min_cost(100_000.0)
///     .date_range(DateRange::LastDays(30));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuerySpec {
    /// Case-insensitive substring of the permit type
    pub permit_type: Option<String>,
    /// Exact status
    pub status: Option<String>,
    /// Inclusive lower bound on estimated cost
    pub min_cost: Option<f64>,
    /// Inclusive upper bound on estimated cost
    pub max_cost: Option<f64>,
    /// Case-insensitive substring of the community name
    pub community: Option<String>,
    /// Exact work class
    pub work_class: Option<String>,
    pub date_range: DateRange,
    pub pagination: Pagination,
}

fn non_blank(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    if value.trim().is_empty() { None } else { Some(value) }
}

impl QuerySpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn permit_type(mut self, permit_type: impl Into<String>) -> Self {
        self.permit_type = non_blank(permit_type);
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = non_blank(status);
        self
    }

    pub fn min_cost(mut self, min: f64) -> Self {
        self.min_cost = Some(min);
        self
    }

    pub fn max_cost(mut self, max: f64) -> Self {
        self.max_cost = Some(max);
        self
    }

    pub fn community(mut self, community: impl Into<String>) -> Self {
        self.community = non_blank(community);
        self
    }

    pub fn work_class(mut self, work_class: impl Into<String>) -> Self {
        self.work_class = non_blank(work_class);
        self
    }

    pub fn date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    pub fn pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    /// Check the spec is well formed before any cache access.
    pub fn validate(&self) -> Result<()> {
        for (name, bound) in [("min_cost", self.min_cost), ("max_cost", self.max_cost)] {
            if let Some(value) = bound {
                if !value.is_finite() {
                    return Err(Error::InvalidQuery(format!("{} must be a finite number", name)));
                }
                if value < 0.0 {
                    return Err(Error::InvalidQuery(format!(
                        "{} must not be negative (got {})",
                        name, value
                    )));
                }
            }
        }

        if let (Some(min), Some(max)) = (self.min_cost, self.max_cost) {
            if min > max {
                return Err(Error::InvalidQuery(format!(
                    "min_cost ({}) exceeds max_cost ({})",
                    min, max
                )));
            }
        }

        match self.date_range {
            DateRange::LastDays(0) => {
                return Err(Error::InvalidQuery(
                    "date range must cover at least one day".to_string(),
                ));
            }
            DateRange::LastDays(days) if days > MAX_DATE_RANGE_DAYS => {
                return Err(Error::InvalidQuery(format!(
                    "date range of {} days exceeds the maximum of {} days",
                    days, MAX_DATE_RANGE_DAYS
                )));
            }
            _ => {}
        }

        Ok(())
    }
}
