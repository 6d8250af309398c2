//! Process configuration
//!
//! Settings are loaded from:
//! 1. `.env` file in the current directory or parent directories (if present)
//! 2. System environment variables
//!
//! Environment variables take precedence over .env file values.
//!
//! ## Keys
//! - `MONETIZATION_SYSTEM_ID`: identity stamped into every execution context
//!   (default `default-system-id`)
//! - `MONETIZATION_LOG_LEVEL`: tracing level (default `info`)
//! - `MONETIZATION_DISPATCH_TIMEOUT_MS`: optional per-dispatch timeout used by
//!   the CLI, a positive integer

use std::path::Path;
use std::time::Duration;

use shared::{SharedError, SharedResult};

pub const SYSTEM_ID_VAR: &str = "MONETIZATION_SYSTEM_ID";
pub const LOG_LEVEL_VAR: &str = "MONETIZATION_LOG_LEVEL";
pub const DISPATCH_TIMEOUT_VAR: &str = "MONETIZATION_DISPATCH_TIMEOUT_MS";

pub const DEFAULT_SYSTEM_ID: &str = "default-system-id";
pub const DEFAULT_LOG_LEVEL: &str = "info";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorConfig {
    pub system_id: String,
    pub log_level: String,
    pub dispatch_timeout: Option<Duration>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            system_id: DEFAULT_SYSTEM_ID.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            dispatch_timeout: None,
        }
    }
}

impl OrchestratorConfig {
    /// Load from the process environment, reading a `.env` file first if one exists
    pub fn from_env() -> SharedResult<Self> {
        // Silently ignored when no .env file is found
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load a specific env file into the process environment, then read it
    pub fn from_env_file(path: &Path) -> SharedResult<Self> {
        dotenv::from_path(path).map_err(|err| SharedError::InvalidConfig {
            field: "env_file".to_string(),
            value: format!("{}: {err}", path.display()),
        })?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup function
    pub fn from_lookup<F>(lookup: F) -> SharedResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(SYSTEM_ID_VAR) {
            config.set_system_id(&value)?;
        }
        if let Some(value) = lookup(LOG_LEVEL_VAR) {
            config.set_log_level(&value)?;
        }
        if let Some(value) = lookup(DISPATCH_TIMEOUT_VAR) {
            config.dispatch_timeout = match value.trim().parse::<u64>() {
                Ok(millis) if millis > 0 => Some(Duration::from_millis(millis)),
                _ => return Err(invalid(DISPATCH_TIMEOUT_VAR, &value)),
            };
        }

        Ok(config)
    }

    /// Override the system id; blank values are rejected
    pub fn set_system_id(&mut self, value: &str) -> SharedResult<()> {
        let system_id = value.trim();
        if system_id.is_empty() {
            return Err(invalid(SYSTEM_ID_VAR, value));
        }
        self.system_id = system_id.to_string();
        Ok(())
    }

    /// Override the log level; accepts trace, debug, info, warn or error in any case
    pub fn set_log_level(&mut self, value: &str) -> SharedResult<()> {
        let level = value.trim().to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(invalid(LOG_LEVEL_VAR, value));
        }
        self.log_level = level;
        Ok(())
    }
}

fn invalid(field: &str, value: &str) -> SharedError {
    SharedError::InvalidConfig {
        field: field.to_string(),
        value: value.to_string(),
    }
}
