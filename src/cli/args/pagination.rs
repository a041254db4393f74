//! Pagination argument types for CLI commands

use clap::Args;

use crate::error::Result;
use crate::query::Pagination;

/// Offset/limit arguments for list commands.
///
/// Values are taken as signed integers so that a negative value reaches query
/// validation and is reported as an invalid query, not a parse failure.
#[derive(Args, Debug, Default, Clone)]
pub struct PaginationArgs {
    /// Maximum results to return (default from config, 1000)
    #[arg(long, short = 'n', allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Number of matching results to skip
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub offset: i64,
}

impl PaginationArgs {
    /// Convert to query pagination, using `default_limit` when no limit was given.
    pub fn to_pagination(&self, default_limit: usize) -> Result<Pagination> {
        Pagination::from_signed(self.offset, self.limit, default_limit)
    }
}
