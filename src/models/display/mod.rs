//! Display model implementations for table and JSON output

mod analytics;
mod permit;

pub use analytics::{CommunityDisplay, ContractorDisplay, SummaryDisplay};
pub use permit::{PermitDetail, PermitDisplay};
