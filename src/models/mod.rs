//! Display models for CLI output
//!
//! Converts permit records and analytics rows into CLI-friendly display formats.

pub mod display;

pub use display::{
    CommunityDisplay, ContractorDisplay, PermitDetail, PermitDisplay, SummaryDisplay,
};
