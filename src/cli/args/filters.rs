//! Permit filter arguments

use clap::Args;

use crate::error::Result;
use crate::query::{DateRange, QuerySpec};

/// Filter arguments shared by `permits list` and `permits summary`.
#[derive(Args, Debug, Default, Clone)]
pub struct PermitFilterArgs {
    /// Permit type (substring match, case-insensitive)
    #[arg(long = "permit-type", short = 't')]
    pub permit_type: Option<String>,

    /// Current status (exact match, e.g. "Issued Permit")
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// Minimum estimated cost (inclusive)
    #[arg(long, allow_negative_numbers = true)]
    pub min_cost: Option<f64>,

    /// Maximum estimated cost (inclusive)
    #[arg(long, allow_negative_numbers = true)]
    pub max_cost: Option<f64>,

    /// Community name (substring match, case-insensitive)
    #[arg(long, short = 'c')]
    pub community: Option<String>,

    /// Work class (exact match, e.g. "New")
    #[arg(long = "work-class", short = 'w')]
    pub work_class: Option<String>,

    /// Applied-date window: all, 7days, 30days, 90days, or any <N>days
    #[arg(long = "date-range", short = 'd', default_value = "all")]
    pub date_range: String,
}

impl PermitFilterArgs {
    /// Build a validated query spec (pagination left at its default).
    pub fn to_spec(&self) -> Result<QuerySpec> {
        let mut spec = QuerySpec::new().date_range(self.date_range.parse::<DateRange>()?);

        if let Some(ref permit_type) = self.permit_type {
            spec = spec.permit_type(permit_type.as_str());
        }
        if let Some(ref status) = self.status {
            spec = spec.status(status.as_str());
        }
        if let Some(min) = self.min_cost {
            spec = spec.min_cost(min);
        }
        if let Some(max) = self.max_cost {
            spec = spec.max_cost(max);
        }
        if let Some(ref community) = self.community {
            spec = spec.community(community.as_str());
        }
        if let Some(ref work_class) = self.work_class {
            spec = spec.work_class(work_class.as_str());
        }

        spec.validate()?;
        Ok(spec)
    }
}
