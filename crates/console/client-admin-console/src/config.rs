//! Configuration for the client admin console
//!
//! Values are layered, later sources winning:
//! - built-in defaults
//! - a TOML file (`--config`, `CLIENT_ADMIN_CONFIG_FILE`, or
//!   `<config dir>/client-admin/config.toml`)
//! - environment variables with the `CLIENT_ADMIN` prefix, using `__` for
//!   nesting, e.g. `CLIENT_ADMIN__API__ORG_ID=7`
//! - command line flags, applied by the binary

use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, Map};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an explicit config file.
pub const CONFIG_FILE_ENV: &str = "CLIENT_ADMIN_CONFIG_FILE";

/// Prefix of environment overrides, e.g. `CLIENT_ADMIN__API__ORG_ID`.
pub const ENV_PREFIX: &str = "CLIENT_ADMIN";

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_FORMATS: [&str; 3] = ["pretty", "json", "compact"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Backend connection
    pub api: ApiConfig,

    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the backend; `/api/clients` is appended to it
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Organization every request is scoped to
    #[serde(default = "default_org_id")]
    pub org_id: i64,

    /// Optional bearer token sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,

    /// Request timeout. Requests never time out when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter string
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (pretty, json, compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_server_url() -> String {
    "http://localhost:9080".to_string()
}

fn default_org_id() -> i64 {
    1
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            org_id: default_org_id(),
            bearer_token: None,
            timeout_secs: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ConsoleConfig {
    /// Where the config file is looked up when none is given explicitly.
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Failed to get config directory")?;
        Ok(dir.join("client-admin").join("config.toml"))
    }

    /// Resolve the config file path from an explicit flag, the environment,
    /// or the per-user default.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
            return Ok(PathBuf::from(path));
        }
        Self::default_path()
    }

    /// Load defaults, the config file if it exists, then the environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_path(explicit)?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`ConsoleConfig::load_from`], reading overrides from `env`
    /// instead of the process environment when given.
    pub fn load_with_env(path: &Path, env: Option<Map<String, String>>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config = builder.build().context("Failed to build configuration")?;
        let settings: ConsoleConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        settings.validate()?;
        Ok(settings)
    }

    /// Write this configuration as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).context("Failed to create config directory")?;
        }
        std::fs::write(path, self.to_toml()?).context("Failed to write config file")?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let server_url = self.api.server_url.trim();
        if server_url.is_empty() {
            anyhow::bail!("Server URL cannot be empty");
        }
        if !server_url.starts_with("http://") && !server_url.starts_with("https://") {
            anyhow::bail!(
                "Server URL '{}' must start with http:// or https://",
                self.api.server_url
            );
        }

        if self.api.timeout_secs == Some(0) {
            anyhow::bail!("Request timeout must be greater than 0");
        }

        let is_filter = self.logging.level.contains('=') || self.logging.level.contains(',');
        let level_lower = self.logging.level.to_lowercase();
        if !is_filter && !VALID_LEVELS.contains(&level_lower.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}'. Must be one of: {:?}",
                self.logging.level,
                VALID_LEVELS
            );
        }

        let format_lower = self.logging.format.to_lowercase();
        if !VALID_FORMATS.contains(&format_lower.as_str()) {
            anyhow::bail!(
                "Invalid log format '{}'. Must be one of: {:?}",
                self.logging.format,
                VALID_FORMATS
            );
        }

        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.api.timeout_secs.map(Duration::from_secs)
    }

    /// Get the log filter string for tracing
    pub fn log_filter(&self) -> String {
        if self.logging.level.contains('=') || self.logging.level.contains(',') {
            self.logging.level.clone()
        } else {
            format!(
                "client_admin_console={},client_admin_api={},{}",
                self.logging.level, self.logging.level, self.logging.level
            )
        }
    }
}
