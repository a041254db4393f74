//! Analytics display models

use serde::Serialize;
use tabled::Tabled;

use crate::output::formatters::{format_currency, format_currency_full};
use crate::query::{CommunityStats, ContractorStats, SummaryStats};

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CommunityDisplay {
    #[tabled(rename = "#")]
    pub rank: usize,

    #[tabled(rename = "COMMUNITY")]
    pub name: String,

    #[tabled(rename = "PERMITS")]
    pub count: usize,

    #[tabled(rename = "TOTAL VALUE")]
    pub total_value: String,

    #[tabled(rename = "AVG VALUE")]
    pub avg_value: String,

    #[tabled(rename = "NEW")]
    pub new_projects: usize,

    #[tabled(rename = "CONTRACTORS")]
    pub unique_contractors: usize,
}

impl CommunityDisplay {
    /// Display rows in ranked order, numbered from 1
    pub fn ranked(stats: &[CommunityStats]) -> Vec<Self> {
        stats
            .iter()
            .enumerate()
            .map(|(i, s)| Self {
                rank: i + 1,
                name: s.name.clone(),
                count: s.count,
                total_value: format_currency(s.total_value),
                avg_value: format_currency(s.avg_value),
                new_projects: s.new_projects,
                unique_contractors: s.unique_contractors,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ContractorDisplay {
    #[tabled(rename = "#")]
    pub rank: usize,

    #[tabled(rename = "CONTRACTOR")]
    pub name: String,

    #[tabled(rename = "PERMITS")]
    pub count: usize,

    #[tabled(rename = "TOTAL VALUE")]
    pub total_value: String,

    #[tabled(rename = "AVG VALUE")]
    pub avg_value: String,

    #[tabled(rename = "COMMUNITIES")]
    pub unique_communities: usize,
}

impl ContractorDisplay {
    pub fn ranked(stats: &[ContractorStats]) -> Vec<Self> {
        stats
            .iter()
            .enumerate()
            .map(|(i, s)| Self {
                rank: i + 1,
                name: s.name.clone(),
                count: s.count,
                total_value: format_currency(s.total_value),
                avg_value: format_currency(s.avg_value),
                unique_communities: s.unique_communities,
            })
            .collect()
    }
}

/// One metric row of the summary table
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SummaryDisplay {
    #[tabled(rename = "METRIC")]
    pub metric: String,

    #[tabled(rename = "VALUE")]
    pub value: String,
}

impl SummaryDisplay {
    pub fn rows(stats: &SummaryStats) -> Vec<Self> {
        let row = |metric: &str, value: String| Self {
            metric: metric.to_string(),
            value,
        };
        vec![
            row("Total permits", stats.total_permits.to_string()),
            row("Total value", format_currency_full(stats.total_value)),
            row("Average value", format_currency_full(stats.avg_value)),
            row("New projects", stats.new_projects.to_string()),
            row("Active permits", stats.active_permits.to_string()),
            row("Applied in last 30 days", stats.recent_permits.to_string()),
            row("Contractors", stats.unique_contractors.to_string()),
            row("Communities", stats.unique_communities.to_string()),
        ]
    }
}
