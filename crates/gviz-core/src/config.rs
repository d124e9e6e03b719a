// Rust guideline compliant 2026-02-06

//! Configuration management for response assembly.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "gviz.toml";

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Configuration for response assembly behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Whether ok and warning responses carry a `sig` for the table.
    #[serde(default = "default_emit_signature")]
    pub emit_signature: bool,

    /// Whether to add a `Content-Disposition` header when `outFileName` is set.
    #[serde(default)]
    pub attachment_headers: bool,

    /// Log verbosity for binaries embedding the core.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_emit_signature() -> bool {
    false
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            emit_signature: default_emit_signature(),
            attachment_headers: false,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. The TOML file at `path`, if it exists
    /// 3. Environment variables with `GVIZ_` prefix
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The file contains invalid TOML
    /// - An environment variable or the final values fail validation
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)
                .map_err(|e| Error::InvalidConfig(format!("{}: {}", path.display(), e)))?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Loads `gviz.toml` from the given directory.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        Self::load(&dir.join(CONFIG_FILE_NAME))
    }

    /// Applies environment variable overrides.
    ///
    /// Supported environment variables:
    /// - `GVIZ_EMIT_SIGNATURE` - true/false
    /// - `GVIZ_ATTACHMENT_HEADERS` - true/false
    /// - `GVIZ_LOG_LEVEL` - error/warn/info/debug/trace
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("GVIZ_EMIT_SIGNATURE") {
            self.emit_signature = val.parse().map_err(|_| {
                Error::InvalidConfig("GVIZ_EMIT_SIGNATURE must be true or false".to_string())
            })?;
        }

        if let Ok(val) = std::env::var("GVIZ_ATTACHMENT_HEADERS") {
            self.attachment_headers = val.parse().map_err(|_| {
                Error::InvalidConfig("GVIZ_ATTACHMENT_HEADERS must be true or false".to_string())
            })?;
        }

        if let Ok(val) = std::env::var("GVIZ_LOG_LEVEL") {
            self.log_level = val.to_lowercase();
        }

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(Error::InvalidConfig(format!(
                "log_level must be one of {}, got {}",
                LOG_LEVELS.join("/"),
                self.log_level
            )));
        }
        Ok(())
    }

    /// Saves the configuration as pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfig(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
