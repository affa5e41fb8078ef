//! Console configuration loaded from a TOML file.
//!
//! ```toml
//! prompt = "argot> "
//! prefix = ";"
//! show_usage_on_mismatch = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors while loading the console configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        /// Path of the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`ConsoleConfig`]
    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        /// Path of the config file
        path: PathBuf,
        /// Underlying TOML error
        #[source]
        source: toml::de::Error,
    },
}

/// Console settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Prompt printed before each line is read
    pub prompt: String,
    /// Marker every command line has to start with, stripped before dispatch
    pub prefix: Option<String>,
    /// Print the command's overloads when none of them matched
    pub show_usage_on_mismatch: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            prefix: None,
            show_usage_on_mismatch: true,
        }
    }
}

/// Load the configuration at `path`, or the defaults if there is no file
pub fn load_config(path: &Path) -> Result<ConsoleConfig, ConfigError> {
    if !path.exists() {
        return Ok(ConsoleConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
