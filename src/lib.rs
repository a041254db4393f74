//! PermitLeads library
//!
//! Cached, queryable view over the City of Calgary building-permit open data:
//! a single-flight refreshing cache, a filter pipeline and ranked analytics,
//! exposed through `service::PermitService` and the `permitleads` CLI.

pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod query;
pub mod service;

pub use error::{Error, Result};
pub use service::PermitService;
