//! Application configuration loaded from environment variables.

use thiserror::Error;
use todo_redux_runtime::devtools::DEFAULT_MAX_AGE;

/// Tracing filter used when neither `RUST_LOG` nor `TODO_LOG_FILTER` is set
pub const DEFAULT_LOG_FILTER: &str = "todo=info,todo_redux_runtime=info";

/// Configuration errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A boolean variable held something other than a recognised flag
    #[error("{var}: expected a boolean (1/0, true/false, yes/no, on/off), got {value:?}")]
    InvalidBool {
        /// Variable name
        var: &'static str,
        /// Offending value
        value: String,
    },

    /// A numeric variable could not be parsed
    #[error("{var}: expected a positive integer, got {value:?}")]
    InvalidNumber {
        /// Variable name
        var: &'static str,
        /// Offending value
        value: String,
    },
}

/// Demo application configuration
///
/// | Variable | Default |
/// |---|---|
/// | `TODO_LOG_FILTER` | `todo=info,todo_redux_runtime=info` |
/// | `TODO_LOG_STATES` | `false` |
/// | `TODO_DEVTOOLS_MAX_AGE` | `50` |
/// | `TODO_METRICS` | `false` |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Tracing filter directive
    pub log_filter: String,
    /// Log previous and next state on every action
    pub log_states: bool,
    /// Number of transitions the inspector keeps
    pub devtools_max_age: usize,
    /// Install the Prometheus recorder and print it on exit
    pub metrics: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_states: false,
            devtools_max_age: DEFAULT_MAX_AGE,
            metrics: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an unparseable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_filter = lookup("TODO_LOG_FILTER")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        let log_states = match lookup("TODO_LOG_STATES") {
            Some(value) => parse_bool("TODO_LOG_STATES", &value)?,
            None => defaults.log_states,
        };

        let devtools_max_age = match lookup("TODO_DEVTOOLS_MAX_AGE") {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidNumber {
                    var: "TODO_DEVTOOLS_MAX_AGE",
                    value,
                })?,
            None => defaults.devtools_max_age,
        };

        let metrics = match lookup("TODO_METRICS") {
            Some(value) => parse_bool("TODO_METRICS", &value)?,
            None => defaults.metrics,
        };

        Ok(Self {
            log_filter,
            log_states,
            devtools_max_age,
            metrics,
        })
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}
