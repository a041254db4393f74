//! Output formatting for CLI results

use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod formatters;
pub mod json;
pub mod table;

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;
}

impl<T: Tabled + Serialize> Formattable for Vec<T> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table | OutputFormat::Pretty => Ok(table::format_table(self)),
            OutputFormat::Json => Ok(json::format_json(self, None)?),
        }
    }
}

/// Format and print data to stdout
pub fn print<T: Formattable>(data: &T, format: OutputFormat) -> Result<()> {
    let output = data.format(format)?;
    println!("{}", output);
    Ok(())
}

/// Print any serializable value inside the JSON envelope
pub fn print_json<T: Serialize + ?Sized>(data: &T, cache_updated: Option<DateTime<Utc>>) -> Result<()> {
    println!("{}", json::format_json(data, cache_updated)?);
    Ok(())
}
