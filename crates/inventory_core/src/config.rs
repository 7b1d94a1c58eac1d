//! Runtime configuration for the inventory core.
//!
//! # Responsibility
//! - Describe where the store lives and how connections are tuned.
//! - Load settings from a JSON file or from `INVENTORY_*` environment variables.
//!
//! # Invariants
//! - Missing optional keys fall back to documented defaults.
//! - Loading never panics; malformed input is reported as `ConfigError`.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_DB_PATH: &str = "INVENTORY_DB_PATH";
pub const ENV_BUSY_TIMEOUT_MS: &str = "INVENTORY_BUSY_TIMEOUT_MS";
pub const ENV_LOG_LEVEL: &str = "INVENTORY_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "INVENTORY_LOG_DIR";

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    MissingKey(&'static str),
    InvalidValue { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config `{}`: {source}", path.display())
            }
            Self::MissingKey(key) => write!(f, "missing required setting `{key}`"),
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value `{value}` for setting `{key}`")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::MissingKey(_) => None,
            Self::InvalidValue { .. } => None,
        }
    }
}

/// Connection settings consumed by [`crate::db::ConnectionProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    /// SQLite database file.
    pub database_path: PathBuf,
    /// How long a statement waits on a locked database before failing.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// Enables `PRAGMA foreign_keys` on every connection.
    #[serde(default = "default_true")]
    pub foreign_keys: bool,
}

impl StoreConfig {
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            foreign_keys: true,
        }
    }
}

/// Full application settings: store plus logging.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    pub store: StoreConfig,
    /// One of `trace|debug|info|warn|error`. Defaults per build mode.
    #[serde(default)]
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files. Logging stays off when unset.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Reads settings from a JSON document on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.
    ///
    /// `INVENTORY_DB_PATH` is required; everything else is optional.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = lookup(ENV_DB_PATH)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingKey(ENV_DB_PATH))?;
        let mut store = StoreConfig::new(database_path.trim());

        if let Some(raw) = lookup(ENV_BUSY_TIMEOUT_MS) {
            store.busy_timeout_ms =
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: ENV_BUSY_TIMEOUT_MS,
                        value: raw.clone(),
                    })?;
        }

        Ok(Self {
            store,
            log_level: lookup(ENV_LOG_LEVEL).filter(|value| !value.trim().is_empty()),
            log_dir: lookup(ENV_LOG_DIR)
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    /// Effective log level after applying the build-mode default.
    pub fn effective_log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or_else(|| crate::logging::default_log_level())
    }
}

fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

fn default_true() -> bool {
    true
}
