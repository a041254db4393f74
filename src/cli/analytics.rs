//! Analytics command implementations

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::error::Result;
use crate::models::{CommunityDisplay, ContractorDisplay};
use crate::output;
use crate::output::formatters::format_timestamp_local;

/// Run the `analytics communities` command
pub async fn communities(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let analytics = ctx.service.community_analytics().await?;

    match ctx.format {
        OutputFormat::Json => output::print_json(&analytics, Some(analytics.cache_updated))?,
        OutputFormat::Table | OutputFormat::Pretty => {
            if ctx.format == OutputFormat::Pretty {
                println!("{}", "Top communities by project value".bold());
            }
            output::print(&CommunityDisplay::ranked(&analytics.communities), ctx.format)?;
            print_data_age(analytics.cache_updated);
        }
    }

    Ok(())
}

/// Run the `analytics contractors` command
pub async fn contractors(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let analytics = ctx.service.contractor_analytics().await?;

    match ctx.format {
        OutputFormat::Json => output::print_json(&analytics, Some(analytics.cache_updated))?,
        OutputFormat::Table | OutputFormat::Pretty => {
            if ctx.format == OutputFormat::Pretty {
                println!("{}", "Top contractors by project value".bold());
            }
            output::print(&ContractorDisplay::ranked(&analytics.contractors), ctx.format)?;
            print_data_age(analytics.cache_updated);
        }
    }

    Ok(())
}

fn print_data_age(cache_updated: chrono::DateTime<chrono::Utc>) {
    println!(
        "{}",
        format!("Data as of {}", format_timestamp_local(cache_updated)).dimmed()
    );
}
