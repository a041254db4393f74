//! Command execution context
//!
//! Loads configuration, applies CLI overrides and builds the permit service
//! every command works through.

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::SocrataClient;
use crate::config::Config;
use crate::error::Result;
use crate::service::PermitService;

/// Context for command execution containing config, service, and output format.
pub struct CommandContext {
    /// Loaded configuration with CLI overrides applied
    pub config: Config,
    /// Query facade over the Socrata dataset
    pub service: PermitService<SocrataClient>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// # Errors
    /// Returns error if the config file cannot be parsed or is invalid.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Self::resolve_config(opts)?;
        let client = SocrataClient::new(&config)?;
        log::debug!("Using permit data source {}", client.base_url());

        Ok(Self {
            service: PermitService::new(client, &config),
            config,
            format: opts.format,
        })
    }

    /// Config file merged with CLI/env overrides
    fn resolve_config(opts: &GlobalOptions) -> Result<Config> {
        let mut config = Config::load_at(opts.config_ref())?;
        if let Some(url) = opts.api_url_ref() {
            config.api_url = url.to_string();
        }
        config.validate()?;
        Ok(config)
    }
}
