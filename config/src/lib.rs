//! Configuration for Steady.
//!
//! Read from `~/.steady/config.toml`. Every section is optional.
//!
//! ```toml
//! [gate]
//! screen_on = true
//! panel_expanded = false
//! pulsing = false
//!
//! [log]
//! filter = "steady_core=debug"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use steady_types::Signals;
use thiserror::Error;

#[derive(Debug, Default, Deserialize)]
pub struct SteadyConfig {
    pub gate: Option<GateConfig>,
    pub log: Option<LogConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

/// Signal values the gate starts from before the first setter runs.
#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct GateConfig {
    #[serde(default)]
    pub screen_on: bool,
    #[serde(default)]
    pub panel_expanded: bool,
    #[serde(default)]
    pub pulsing: bool,
}

impl GateConfig {
    #[must_use]
    pub fn initial_signals(self) -> Signals {
        Signals {
            screen_on: self.screen_on,
            panel_expanded: self.panel_expanded,
            pulsing: self.pulsing,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive, used when `RUST_LOG` is unset.
    pub filter: Option<String>,
}

impl SteadyConfig {
    /// Load the user config. `Ok(None)` when no config file exists.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let path = match config_path() {
            Some(path) => path,
            None => return Ok(None),
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        Self::from_toml_str(&content).map_err(|err| {
            tracing::warn!("Failed to parse config at {:?}: {}", path, err);
            ConfigError::Parse {
                path: path.to_path_buf(),
                source: err,
            }
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn initial_signals(&self) -> Signals {
        self.gate.unwrap_or_default().initial_signals()
    }

    #[must_use]
    pub fn log_filter(&self) -> Option<&str> {
        self.log.as_ref().and_then(|log| log.filter.as_deref())
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".steady").join("config.toml"))
}
