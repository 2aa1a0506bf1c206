//! Top-level application configuration.
//!
//! Configuration is stored in `<root>/config.yaml` and includes:
//! - The OMDb API key
//! - API endpoint and request timeout
//! - Log level

use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{MarqueeError, Result};
use crate::paths;

/// Environment variable that takes precedence over the configured API key.
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

pub const DEFAULT_API_URL: &str = "https://www.omdbapi.com/";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Authentication credentials
    #[serde(default)]
    pub auth: AuthConfig,

    /// Remote API settings
    #[serde(default, skip_serializing_if = "ApiConfig::is_default")]
    pub api: ApiConfig,

    /// Logging settings
    #[serde(default, skip_serializing_if = "LogConfig::is_default")]
    pub log: LogConfig,
}

/// Authentication configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub omdb: Option<OmdbAuth>,
}

/// OMDb authentication
#[derive(Clone, Serialize, Deserialize)]
pub struct OmdbAuth {
    pub api_key: String,
}

impl fmt::Debug for OmdbAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OmdbAuth")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the OMDb endpoint
    #[serde(default = "default_api_url")]
    pub url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_api_timeout")]
    pub timeout: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_api_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            timeout: default_api_timeout(),
        }
    }
}

impl ApiConfig {
    /// Check if this config has default values
    pub fn is_default(&self) -> bool {
        self.url == DEFAULT_API_URL && self.timeout == default_api_timeout()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive used when `MARQUEE_LOG` is not set (e.g. "debug", "marquee=trace")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl LogConfig {
    pub fn is_default(&self) -> bool {
        self.level.is_none()
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        paths::config_path()
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            MarqueeError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                MarqueeError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content).map_err(|e| {
            MarqueeError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;

        // Owner read/write only, the file holds the API key
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&path, permissions)?;
        }

        Ok(())
    }

    /// Get the OMDb API key from the environment or config file
    pub fn api_key(&self) -> Option<String> {
        if let Ok(key) = env::var(API_KEY_ENV)
            && !key.is_empty()
        {
            return Some(key);
        }

        self.auth.omdb.as_ref().map(|o| o.api_key.clone())
    }

    /// Set the OMDb API key
    pub fn set_api_key(&mut self, api_key: String) {
        self.auth.omdb = Some(OmdbAuth { api_key });
    }

    /// Get the request timeout duration
    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout)
    }

    /// Set the API base URL, rejecting anything that does not parse
    pub fn set_api_url(&mut self, url: &str) -> Result<()> {
        let parsed = url::Url::parse(url)
            .map_err(|e| MarqueeError::Config(format!("invalid api.url '{url}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(MarqueeError::Config(format!(
                "invalid api.url '{url}': scheme must be http or https"
            )));
        }
        self.api.url = url.to_string();
        Ok(())
    }

    /// Set the request timeout in seconds
    pub fn set_api_timeout(&mut self, seconds: u64) {
        self.api.timeout = seconds;
    }

    pub fn log_level(&self) -> Option<&str> {
        self.log.level.as_deref()
    }

    pub fn set_log_level(&mut self, level: String) {
        self.log.level = Some(level);
    }
}
