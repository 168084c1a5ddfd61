//! CLI configuration
//!
//! Read from a JSON file, `./recordkit.json` unless `--config` names another.
//! The default file is optional; an explicitly named file must exist.
//!
//! ```json
//! { "definitions_dir": "./records", "log_level": "warn" }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "./recordkit.json";

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `*.json` record definitions (default `./records`)
    #[serde(default = "default_definitions_dir")]
    pub definitions_dir: String,

    /// Log level used when `RECORDKIT_LOG` is unset (default `warn`)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_definitions_dir() -> String {
    "./records".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            definitions_dir: default_definitions_dir(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Loads the named file, or the default file when present, or defaults.
    pub fn resolve(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn validate(&self) -> CliResult<()> {
        if self.definitions_dir.trim().is_empty() {
            return Err(CliError::config_error("definitions_dir must not be empty"));
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(CliError::config_error(format!(
                "Invalid log_level: '{}'. Must be one of {}.",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    /// Get definitions directory as Path
    pub fn definitions_path(&self) -> &Path {
        Path::new(&self.definitions_dir)
    }
}
