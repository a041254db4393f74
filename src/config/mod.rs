//! Configuration management for PermitLeads

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Calgary building permits dataset (Socrata SODA endpoint)
pub const DEFAULT_API_URL: &str = "https://data.calgary.ca/resource/c2es-76ed.json";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upstream dataset URL
    pub api_url: String,

    /// Number of records requested per refresh
    pub fetch_limit: usize,

    /// How long a fetched snapshot stays fresh
    pub cache_ttl_secs: u64,

    /// Timeout for the full permit fetch
    pub request_timeout_secs: u64,

    /// Timeout for the lightweight health probe
    pub probe_timeout_secs: u64,

    /// Page size used when a listing does not ask for one
    pub default_page_limit: usize,

    /// Number of groups kept by the analytics views
    pub top_n: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            fetch_limit: 2000,
            cache_ttl_secs: crate::cache::DEFAULT_TTL.as_secs(),
            request_timeout_secs: 30,
            probe_timeout_secs: 10,
            default_page_limit: crate::query::DEFAULT_LIMIT,
            top_n: crate::query::DEFAULT_TOP_N,
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".permitleads").join("config.yaml"))
    }

    /// Load configuration from an explicit path, or the default location.
    ///
    /// A missing file is not an error: every setting has a default.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let path = match path {
            Some(p) => PathBuf::from(p),
            None => match Self::default_path() {
                Ok(p) => p,
                Err(_) => return Ok(Self::default()),
            },
        };
        Self::load_from(path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the cache cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api_url must not be empty".to_string()).into());
        }
        if self.fetch_limit == 0 {
            return Err(ConfigError::Invalid("fetch_limit must be positive".to_string()).into());
        }
        if self.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be positive".to_string()).into());
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}
