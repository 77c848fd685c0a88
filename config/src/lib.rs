//! Configuration file support for recoil-probe.
//!
//! The probe runs with built-in defaults. An optional TOML file at
//! `~/.recoil-probe/config.toml` can override them:
//!
//! ```toml
//! [probe]
//! base_url = "https://recoil.ise.utk.edu/data/Parsed_Data/"
//! deadline_secs = 15
//! slow_threshold_secs = 10
//!
//! [http]
//! timeout_secs = 30
//! connect_timeout_secs = 10
//! user_agent = "recoil-probe/0.1"
//! max_download_bytes = 536870912
//! allow_plain_http = false
//!
//! [display]
//! ascii_only = false
//! ```
//!
//! [`ProbeConfig`] mirrors the file. [`ResolvedConfig`] is what the rest of
//! the program consumes: every value concrete and validated.

mod resolved;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use probe_types::ThresholdError;
use serde::Deserialize;
use thiserror::Error;

pub use resolved::{DisplaySettings, ResolvedConfig};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    pub probe: Option<ProbeSection>,
    pub http: Option<HttpSection>,
    pub display: Option<DisplaySection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeSection {
    /// Directory URL holding the dataset files. Must end with `/`.
    pub base_url: Option<String>,
    /// Hard limit per operation. Default: 15.
    pub deadline_secs: Option<u32>,
    /// Completed operations slower than this are flagged. Default: 10.
    pub slow_threshold_secs: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSection {
    /// Network-level request timeout. Default: 30.
    pub timeout_secs: Option<u32>,
    pub connect_timeout_secs: Option<u32>,
    pub user_agent: Option<String>,
    pub max_download_bytes: Option<u64>,
    /// Allow `http://` base URLs (local mirrors, tests).
    #[serde(default)]
    pub allow_plain_http: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplaySection {
    /// Use ASCII tags instead of emoji status glyphs.
    #[serde(default)]
    pub ascii_only: bool,
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
    #[error("invalid thresholds: {0}")]
    Thresholds(#[from] ThresholdError),
    #[error("invalid {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => Some(path),
            ConfigError::Thresholds(_) | ConfigError::Invalid { .. } => None,
        }
    }
}

impl ProbeConfig {
    /// Load the config from its default location.
    ///
    /// Returns `Ok(None)` when no config file exists.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

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

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }
}

/// Directory holding the config file and logs: `~/.recoil-probe`.
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".recoil-probe"))
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    home_dir().map(|dir| dir.join("config.toml"))
}
