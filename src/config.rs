use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{NormalizeError, Result};

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "address_normalizer.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub dispatch: DispatchConfig,
    pub exit: ExitConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is unset, e.g. "debug"
    pub level: Option<String>,
    /// Directory for daily-rolling JSON log files; console only when unset
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Fail on paths whose suffix has no registered parser instead of skipping them
    pub strict_extensions: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExitConfig {
    /// Exit with status 1 even when every file was processed
    pub legacy_nonzero_status: bool,
}

impl Config {
    /// Load from `path`, or from `address_normalizer.toml` if it exists, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(path).map_err(|e| {
            NormalizeError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}
