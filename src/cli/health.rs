//! Health command implementation

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::error::Result;
use crate::output;
use crate::output::formatters::format_timestamp_local;
use crate::service::{CacheStatus, UpstreamStatus};

/// Report data source reachability and cache state without fetching permits
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let report = ctx.service.health().await;

    if ctx.format == OutputFormat::Json {
        return output::print_json(&report, report.cache_updated);
    }

    let upstream = match report.upstream {
        UpstreamStatus::Up => "up".green(),
        UpstreamStatus::Down => "down".red(),
    };
    let cache = match report.cache_status {
        CacheStatus::Loaded => format!("loaded ({})", report.cache_state).green(),
        CacheStatus::Empty => "empty".yellow(),
    };

    println!("{}", "PermitLeads Health".bold());
    println!("────────────────────────────────────────");
    println!("Status:          {}", report.status);
    println!("Data source:     {} ({})", upstream, ctx.config.api_url);
    println!("Cache:           {}", cache);
    println!("Permits cached:  {}", report.permits_cached);
    if let Some(updated) = report.cache_updated {
        println!("Cache updated:   {}", format_timestamp_local(updated));
    }

    Ok(())
}
