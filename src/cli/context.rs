//! Command execution context
//!
//! Loads configuration, resolves overrides and builds the data-access service
//! once per command.

use std::sync::Arc;

use log::debug;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::{GithubData, GithubService};
use crate::config::Config;
use crate::error::Result;

/// Context for command execution containing config, service and output format.
pub struct CommandContext {
    /// Loaded configuration with environment and flag overrides applied
    pub config: Config,
    /// Data-access service shared by every request of the command
    pub service: Arc<dyn GithubData>,
    /// Resolved output format
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a command context.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or is invalid, or
    /// if the HTTP client cannot be built.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Self::resolve_config(opts)?;
        let settings = config.service_settings();
        debug!(
            "Using API root {} with {:?} between requests",
            settings.base_url, settings.rate_limit_interval
        );

        let service = Arc::new(GithubService::from_settings(&settings)?);
        let format = Self::resolve_format(opts, &config);

        Ok(Self {
            config,
            service,
            format,
        })
    }

    /// Load the config file and layer environment and flags over it.
    pub fn resolve_config(opts: &GlobalOptions) -> Result<Config> {
        let mut config = Config::load_at(opts.config_ref())?;
        config.apply_env();
        config.apply_overrides(opts.api_host_ref());
        config.validate()?;
        Ok(config)
    }

    fn resolve_format(opts: &GlobalOptions, config: &Config) -> OutputFormat {
        opts.format
            .or_else(|| {
                config
                    .preferences
                    .format
                    .as_deref()
                    .and_then(OutputFormat::from_preference)
            })
            .unwrap_or_default()
    }

    /// Page size from the flag, falling back to the configured default.
    pub fn page_size(&self, flag: Option<usize>) -> usize {
        flag.unwrap_or(self.config.preferences.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preferences;

    fn config_with_format(format: Option<&str>) -> Config {
        Config {
            preferences: Preferences {
                format: format.map(str::to_string),
                page_size: 30,
                ..Preferences::default()
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_format_flag_wins() {
        let opts = GlobalOptions {
            format: Some(OutputFormat::Json),
            ..GlobalOptions::default()
        };
        let config = config_with_format(Some("table"));

        assert_eq!(
            CommandContext::resolve_format(&opts, &config),
            OutputFormat::Json
        );
    }

    #[test]
    fn test_format_falls_back_to_preference_then_default() {
        let opts = GlobalOptions::default();

        assert_eq!(
            CommandContext::resolve_format(&opts, &config_with_format(Some("table"))),
            OutputFormat::Table
        );
        assert_eq!(
            CommandContext::resolve_format(&opts, &config_with_format(Some("bogus"))),
            OutputFormat::Pretty
        );
        assert_eq!(
            CommandContext::resolve_format(&opts, &config_with_format(None)),
            OutputFormat::Pretty
        );
    }

    #[test]
    fn test_page_size_flag_and_default() {
        let ctx = CommandContext {
            config: config_with_format(None),
            service: Arc::new(
                GithubService::from_settings(&Default::default()).unwrap(),
            ),
            format: OutputFormat::Pretty,
        };

        assert_eq!(ctx.page_size(Some(5)), 5);
        assert_eq!(ctx.page_size(None), 30);
    }
}
