//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Locate the vocabulary store file and optional log directory.
//! - Parse log level and agent step limit overrides.
//!
//! # Invariants
//! - Blank variables are treated as unset.
//! - Resolution never touches the filesystem; the store directory is created
//!   lazily by `db::open_db`.

use crate::agent::DEFAULT_MAX_STEPS;
use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "CANTOVOCAB_DB_PATH";
pub const ENV_LOG_DIR: &str = "CANTOVOCAB_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "CANTOVOCAB_LOG_LEVEL";
pub const ENV_MAX_AGENT_STEPS: &str = "CANTOVOCAB_MAX_AGENT_STEPS";

const DB_FILE_NAME: &str = "cantovocab.sqlite3";
const APP_DIR_NAME: &str = "cantovocab";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    /// Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    pub log_level: String,
    pub max_agent_steps: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value `{value}` for {key}")
            }
        }
    }
}

impl Error for ConfigError {}

impl AppConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(ENV_DB_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);
        let log_dir = read(ENV_LOG_DIR).map(PathBuf::from);
        let log_level = read(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string());
        let max_agent_steps = match read(ENV_MAX_AGENT_STEPS) {
            Some(raw) => match raw.parse::<usize>() {
                Ok(steps) if steps > 0 => steps,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: ENV_MAX_AGENT_STEPS,
                        value: raw,
                    })
                }
            },
            None => DEFAULT_MAX_STEPS,
        };

        Ok(Self {
            db_path,
            log_dir,
            log_level,
            max_agent_steps,
        })
    }
}

/// Platform data directory when known, system temp dir otherwise.
pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(std::env::temp_dir)
        .join(DB_FILE_NAME)
}
