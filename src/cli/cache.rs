//! Cache management commands

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::error::Result;
use crate::output;
use crate::output::formatters::format_timestamp_local;

/// Force a refresh of the permit snapshot
pub async fn refresh(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let summary = ctx.service.refresh().await?;

    match ctx.format {
        OutputFormat::Json => output::print_json(&summary, Some(summary.updated_at))?,
        _ => {
            println!(
                "{} Refreshed {} permits from {}",
                "✓".green(),
                summary.permits_count,
                ctx.config.api_url
            );
            println!("Updated: {}", format_timestamp_local(summary.updated_at));
        }
    }

    Ok(())
}
