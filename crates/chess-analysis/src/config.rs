//! Engine configuration.
//!
//! An [`EngineConfig`] is built once, from TOML or in code, and handed to
//! [`Engine::start`](crate::Engine::start). Reconfiguring produces a new
//! value through [`EngineConfig::with_option`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A value is out of range or an option value has the wrong type.
    #[error("Invalid engine config: {0}")]
    Invalid(String),
}

/// Settings for one UCI engine instance.
///
/// ```toml
/// path = "/usr/local/bin/stockfish"
/// syzygy_path = "/data/syzygy/3-4-5"
/// movetime_ms = 500
/// multi_pv = 3
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Engine executable. Defaults to `stockfish` on `PATH`.
    #[serde(default = "default_path")]
    pub path: PathBuf,
    /// Syzygy tablebase directories, sent verbatim as `SyzygyPath`.
    #[serde(default)]
    pub syzygy_path: Option<PathBuf>,
    /// Search time per position in milliseconds.
    #[serde(default = "default_movetime_ms")]
    pub movetime_ms: u64,
    /// Maximum search depth per position.
    #[serde(default = "default_depth")]
    pub depth: u32,
    /// Engine search threads.
    #[serde(default = "default_threads")]
    pub threads: u32,
    /// Transposition table size in MB.
    #[serde(default = "default_hash_mb")]
    pub hash_mb: u32,
    /// Number of principal variations reported per position.
    #[serde(default = "default_multi_pv")]
    pub multi_pv: u32,
}

fn default_path() -> PathBuf {
    PathBuf::from("stockfish")
}

fn default_movetime_ms() -> u64 {
    1000
}

fn default_depth() -> u32 {
    20
}

fn default_threads() -> u32 {
    4
}

fn default_hash_mb() -> u32 {
    128
}

fn default_multi_pv() -> u32 {
    1
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            syzygy_path: None,
            movetime_ms: default_movetime_ms(),
            depth: default_depth(),
            threads: default_threads(),
            hash_mb: default_hash_mb(),
            multi_pv: default_multi_pv(),
        }
    }
}

impl EngineConfig {
    /// Default settings for the engine at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML config text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no engine can be started with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("no engine path provided".to_string()));
        }
        if self.multi_pv == 0 {
            return Err(ConfigError::Invalid("multi_pv must be at least 1".to_string()));
        }
        Ok(())
    }

    /// A copy with the named UCI option applied.
    ///
    /// Names are matched as the engine spells them. Unrecognised names
    /// return an unchanged copy, since the option may still mean something
    /// to the engine.
    pub fn with_option(&self, name: &str, value: &str) -> Result<Self, ConfigError> {
        let mut next = self.clone();
        match name {
            "MoveTime" => next.movetime_ms = parse_value(name, value)?,
            "Depth" => next.depth = parse_value(name, value)?,
            "Threads" => next.threads = parse_value(name, value)?,
            "Hash" => next.hash_mb = parse_value(name, value)?,
            "MultiPV" => next.multi_pv = parse_value(name, value)?,
            "SyzygyPath" => {
                next.syzygy_path = if value.is_empty() || value == "<empty>" {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            _ => {}
        }
        next.validate()?;
        Ok(next)
    }
}

fn parse_value<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{name}: expected a number, got {value:?}")))
}
