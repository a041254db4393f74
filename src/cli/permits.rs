//! Permit command implementations

use chrono::Utc;
use colored::Colorize;
use log::debug;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat, PaginationArgs, PermitFilterArgs};
use crate::error::{Error, Result};
use crate::models::{PermitDetail, PermitDisplay, SummaryDisplay};
use crate::output::formatters::{format_age, format_currency_full, format_timestamp_local};
use crate::output::{self, table};

/// Run the `permits list` command
pub async fn list(
    opts: &GlobalOptions,
    filters: &PermitFilterArgs,
    pagination: &PaginationArgs,
) -> Result<()> {
    let spec = filters.to_spec()?;
    let ctx = CommandContext::new(opts)?;
    let spec = spec.pagination(pagination.to_pagination(ctx.config.default_page_limit)?);

    debug!("Listing permits with {:?}", spec);
    let page = ctx.service.list(&spec).await?;
    debug!(
        "{} of {} permits matched, returning {}",
        page.filtered_count,
        page.total_count,
        page.permits.len()
    );

    match ctx.format {
        OutputFormat::Json => output::print_json(&page, Some(page.cache_updated))?,
        OutputFormat::Table | OutputFormat::Pretty => {
            let rows: Vec<PermitDisplay> = page.permits.iter().map(PermitDisplay::from).collect();
            output::print(&rows, ctx.format)?;
            let footer = format!(
                "Showing {} of {} matching permits ({} cached, updated {})",
                rows.len(),
                page.filtered_count,
                page.total_count,
                format_age(page.cache_updated, Utc::now())
            );
            println!("{}", footer.dimmed());
        }
    }

    Ok(())
}

/// Run the `permits get` command
pub async fn get(opts: &GlobalOptions, permit_num: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let permit = ctx
        .service
        .permit(permit_num)
        .await?
        .ok_or_else(|| Error::NotFound(permit_num.to_string()))?;

    match ctx.format {
        OutputFormat::Json => output::print_json(&permit, None)?,
        OutputFormat::Table => {
            output::print(&vec![PermitDisplay::from(&permit)], ctx.format)?;
        }
        OutputFormat::Pretty => {
            println!("{}", format!("Permit {}", permit.permit_num).bold());
            println!("────────────────────────────────────────");
            println!("{}", table::format_fields(&PermitDetail(&permit).fields()));
        }
    }

    Ok(())
}

/// Run the `permits summary` command
pub async fn summary(opts: &GlobalOptions, filters: &PermitFilterArgs) -> Result<()> {
    let spec = filters.to_spec()?;
    let ctx = CommandContext::new(opts)?;

    let report = ctx.service.summary(&spec).await?;

    match ctx.format {
        OutputFormat::Json => output::print_json(&report, Some(report.cache_updated))?,
        OutputFormat::Table => output::print(&SummaryDisplay::rows(&report.stats), ctx.format)?,
        OutputFormat::Pretty => {
            let stats = &report.stats;
            println!("{}", "Permit Summary".bold());
            println!("────────────────────────────────────────");
            println!(
                "{}",
                table::format_fields(&[
                    ("Permits", stats.total_permits.to_string()),
                    ("Total value", format_currency_full(stats.total_value).green().to_string()),
                    ("Average value", format_currency_full(stats.avg_value)),
                    ("New projects", stats.new_projects.to_string()),
                    ("Active permits", stats.active_permits.to_string()),
                    ("Last 30 days", stats.recent_permits.to_string()),
                    ("Contractors", stats.unique_contractors.to_string()),
                    ("Communities", stats.unique_communities.to_string()),
                    ("Data as of", format_timestamp_local(report.cache_updated)),
                ])
            );
        }
    }

    Ok(())
}
