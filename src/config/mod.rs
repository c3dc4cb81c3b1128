//! Configuration management for octolist
//!
//! Settings live in `~/.octolist/config.yaml`. A missing file is not an
//! error: public GitHub data needs no token, so defaults are used.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::pagination::DEFAULT_PAGE_SIZE;
use crate::client::{DEFAULT_API_HOST, ServiceSettings};
use crate::error::{ConfigError, Result};

/// Token environment variables, in precedence order
pub const TOKEN_ENVS: [&str; 2] = ["OCTOLIST_TOKEN", "GITHUB_TOKEN"];

/// Environment variable overriding the API host
pub const API_HOST_ENV: &str = "OCTOLIST_API_HOST";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// GitHub personal access token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// API root for GitHub Enterprise or test servers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Default repositories per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Minimum spacing between API requests, in milliseconds
    #[serde(default = "default_rate_limit_interval_ms")]
    pub rate_limit_interval_ms: u64,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_rate_limit_interval_ms() -> u64 {
    1000
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            page_size: default_page_size(),
            rate_limit_interval_ms: default_rate_limit_interval_ms(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".octolist").join("config.yaml"))
    }

    /// Resolve an explicit path, falling back to the default location.
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an explicit path or the default location.
    ///
    /// An explicitly named file must exist; a missing default file yields
    /// the default configuration.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(Path::new(path)),
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        // The file may hold a token
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Reject values the data-access layer cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.preferences.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".to_string()).into());
        }
        if let Some(host) = &self.api_host {
            reqwest::Url::parse(host)
                .map_err(|e| ConfigError::Invalid(format!("api_host '{}': {}", host, e)))?;
        }
        Ok(())
    }

    /// Layer environment variables over the file values.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|name| std::env::var(name).ok());
    }

    fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(token) = TOKEN_ENVS.into_iter().find_map(&non_empty) {
            self.token = Some(token);
        }
        if let Some(host) = non_empty(API_HOST_ENV) {
            self.api_host = Some(host);
        }
    }

    /// Layer command-line flags over everything else.
    pub fn apply_overrides(&mut self, api_host: Option<&str>) {
        if let Some(host) = api_host {
            self.api_host = Some(host.to_string());
        }
    }

    /// API root without a trailing slash
    pub fn api_base_url(&self) -> String {
        self.api_host
            .as_deref()
            .unwrap_or(DEFAULT_API_HOST)
            .trim_end_matches('/')
            .to_string()
    }

    pub fn rate_limit_interval(&self) -> Duration {
        Duration::from_millis(self.preferences.rate_limit_interval_ms)
    }

    /// Settings for the data-access service
    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            base_url: self.api_base_url(),
            token: self.token.clone(),
            rate_limit_interval: self.rate_limit_interval(),
        }
    }
}
