//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod analytics;
pub mod args;
pub mod cache;
pub mod context;
pub mod health;
pub mod permits;

pub use args::{GlobalOptions, OutputFormat, PaginationArgs, PermitFilterArgs};
pub use context::CommandContext;

/// PermitLeads - cached, queryable view over Calgary building permits
#[derive(Parser, Debug)]
#[command(name = "permitleads")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, pretty, json)
    #[arg(
        long,
        global = true,
        env = "PERMITLEADS_FORMAT",
        default_value = "table",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "PERMITLEADS_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the permit dataset URL
    #[arg(long, global = true, env = "PERMITLEADS_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "PERMITLEADS_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Query building permits
    #[command(subcommand)]
    Permits(PermitCommands),

    /// Ranked community and contractor analytics
    #[command(subcommand)]
    Analytics(AnalyticsCommands),

    /// Manage the permit cache
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Check data source reachability and cache freshness
    Health,

    /// Display version information
    Version,
}

/// Permit query subcommands
#[derive(Subcommand, Debug)]
pub enum PermitCommands {
    /// List permits matching filters
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        filters: PermitFilterArgs,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Show a single permit by permit number
    Get {
        /// Permit number (exact match)
        permit_num: String,
    },

    /// Summary statistics over permits matching filters
    Summary {
        #[command(flatten)]
        filters: PermitFilterArgs,
    },
}

/// Analytics subcommands
#[derive(Subcommand, Debug)]
pub enum AnalyticsCommands {
    /// Communities ranked by total estimated project value
    Communities,

    /// Contractors ranked by total estimated project value
    Contractors,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Fetch fresh permit data regardless of cache age
    Refresh,
}
