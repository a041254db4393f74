//! Grouped analytics and summary statistics

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::client::PermitRecord;

/// Number of groups kept by the analytics views unless configured otherwise
pub const DEFAULT_TOP_N: usize = 20;

/// Group label for permits without a community name
pub const UNKNOWN_COMMUNITY: &str = "Unknown";

/// Work class marking a new-construction project
pub const NEW_WORK_CLASS: &str = "New";

/// Statuses counted as active work
pub const ACTIVE_STATUSES: [&str; 2] = ["Issued Permit", "Pre Backfill Phase"];

/// Window used for the "recent" summary count
pub const RECENT_DAYS: i64 = 30;

/// Per-community aggregate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunityStats {
    pub name: String,
    pub count: usize,
    pub total_value: f64,
    pub avg_value: f64,
    pub new_projects: usize,
    pub unique_contractors: usize,
}

/// Per-contractor aggregate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractorStats {
    pub name: String,
    pub count: usize,
    pub total_value: f64,
    pub avg_value: f64,
    pub unique_communities: usize,
}

/// Headline figures over a set of permits
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_permits: usize,
    pub total_value: f64,
    pub avg_value: f64,
    pub new_projects: usize,
    pub active_permits: usize,
    pub recent_permits: usize,
    pub unique_contractors: usize,
    pub unique_communities: usize,
}

#[derive(Default)]
struct Group<'a> {
    count: usize,
    total_value: f64,
    new_projects: usize,
    related: HashSet<&'a str>,
}

fn average(total: f64, count: usize) -> f64 {
    if count == 0 { 0.0 } else { total / count as f64 }
}

/// Accumulate groups keyed by `key`, preserving first-seen order.
///
/// `related` names the distinct values counted per group (contractors for a
/// community, communities for a contractor).
fn group_by<'a>(
    records: &'a [PermitRecord],
    key: impl Fn(&'a PermitRecord) -> Option<&'a str>,
    related: impl Fn(&'a PermitRecord) -> Option<&'a str>,
) -> Vec<(&'a str, Group<'a>)> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<(&'a str, Group<'a>)> = Vec::new();

    for record in records {
        let Some(name) = key(record) else {
            continue;
        };
        let slot = *index.entry(name).or_insert_with(|| {
            groups.push((name, Group::default()));
            groups.len() - 1
        });

        let group = &mut groups[slot].1;
        group.count += 1;
        group.total_value += record.estimated_cost;
        if record.work_class == NEW_WORK_CLASS {
            group.new_projects += 1;
        }
        if let Some(other) = related(record) {
            group.related.insert(other);
        }
    }

    // Stable: ties keep first-seen order.
    groups.sort_by(|a, b| b.1.total_value.total_cmp(&a.1.total_value));
    groups
}

/// Communities ranked by total estimated value, top `top_n`
pub fn community_stats(records: &[PermitRecord], top_n: usize) -> Vec<CommunityStats> {
    group_by(
        records,
        |r| Some(r.community_name.as_deref().unwrap_or(UNKNOWN_COMMUNITY)),
        |r| r.contractor_name.as_deref(),
    )
    .into_iter()
    .take(top_n)
    .map(|(name, g)| CommunityStats {
        name: name.to_string(),
        count: g.count,
        total_value: g.total_value,
        avg_value: average(g.total_value, g.count),
        new_projects: g.new_projects,
        unique_contractors: g.related.len(),
    })
    .collect()
}

/// Contractors ranked by total estimated value, top `top_n`.
///
/// Permits without a contractor are left out; a missing community counts as
/// "Unknown" toward `unique_communities`.
pub fn contractor_stats(records: &[PermitRecord], top_n: usize) -> Vec<ContractorStats> {
    group_by(
        records,
        |r| r.contractor_name.as_deref(),
        |r| Some(r.community_name.as_deref().unwrap_or(UNKNOWN_COMMUNITY)),
    )
    .into_iter()
    .take(top_n)
    .map(|(name, g)| ContractorStats {
        name: name.to_string(),
        count: g.count,
        total_value: g.total_value,
        avg_value: average(g.total_value, g.count),
        unique_communities: g.related.len(),
    })
    .collect()
}

/// Summary figures for `records` as of `now`
pub fn summarize<'a>(
    records: impl IntoIterator<Item = &'a PermitRecord>,
    now: DateTime<Utc>,
) -> SummaryStats {
    let recent_cutoff = now - Duration::days(RECENT_DAYS);
    let mut contractors = HashSet::new();
    let mut communities = HashSet::new();
    let mut stats = SummaryStats {
        total_permits: 0,
        total_value: 0.0,
        avg_value: 0.0,
        new_projects: 0,
        active_permits: 0,
        recent_permits: 0,
        unique_contractors: 0,
        unique_communities: 0,
    };

    for record in records {
        stats.total_permits += 1;
        stats.total_value += record.estimated_cost;
        if record.work_class == NEW_WORK_CLASS {
            stats.new_projects += 1;
        }
        if ACTIVE_STATUSES.contains(&record.status.as_str()) {
            stats.active_permits += 1;
        }
        if record.applied_date.is_some_and(|d| d >= recent_cutoff) {
            stats.recent_permits += 1;
        }
        if let Some(c) = record.contractor_name.as_deref() {
            contractors.insert(c);
        }
        if let Some(c) = record.community_name.as_deref() {
            communities.insert(c);
        }
    }

    stats.avg_value = average(stats.total_value, stats.total_permits);
    stats.unique_contractors = contractors.len();
    stats.unique_communities = communities.len();
    stats
}
