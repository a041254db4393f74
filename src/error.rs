//! Error types for PermitLeads

use thiserror::Error;

/// Result type alias for PermitLeads operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the library and CLI
#[derive(Debug, Error)]
pub enum Error {
    /// A refresh that the caller required failed upstream
    #[error("Permit data source unavailable: {0}")]
    UpstreamUnavailable(#[from] UpstreamError),

    /// The cache has never been populated and the first fetch failed
    #[error("No permit data loaded yet ({0}). Try again once the data source is reachable.")]
    NoDataYet(UpstreamError),

    /// Single-permit lookup miss
    #[error("Permit not found: {0}")]
    NotFound(String),

    /// Query rejected before touching the cache
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

/// Failures reported by the upstream fetch collaborator.
///
/// `Clone` so that one failed refresh can be handed to every caller waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    #[error("request timed out")]
    Timeout,

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else if err.is_connect() {
            UpstreamError::Http("failed to connect to data source".to_string())
        } else if let Some(status) = err.status() {
            UpstreamError::Http(format!("unexpected status {}", status))
        } else if err.is_decode() {
            UpstreamError::Other(format!("malformed response: {}", err))
        } else {
            UpstreamError::Http(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
