//! crates/logging/src/error.rs
//! Configuration errors raised while reading the logging environment.

use thiserror::Error;

/// Reasons a configuration value could not be used.
///
/// These never reach log callers. [`LogConfig::from_lookup`](crate::LogConfig::from_lookup)
/// and [`LevelStore`](crate::LevelStore) recover by falling back to the
/// default and reporting the error through `tracing`.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ConfigError {
    /// The value was empty after trimming whitespace.
    #[error("log level value is empty")]
    Empty,
    /// The value was neither a number nor a known level name.
    #[error("unknown log level '{0}'")]
    UnknownLevel(String),
    /// The value was numeric but outside `0..=5`.
    #[error("log level {0} is outside the supported range 0-5")]
    LevelOutOfRange(i64),
    /// The backend selector named no known backend.
    #[error("unknown log backend '{0}' (expected builtin, tracing or syslog)")]
    UnknownBackend(String),
    /// The line mode selector named no known mode.
    #[error("unknown line mode '{0}' (expected terminated or verbatim)")]
    UnknownLineMode(String),
    /// The syslog facility named no supported facility.
    #[error("unknown syslog facility '{0}' (expected user, daemon or local0-local7)")]
    UnknownFacility(String),
}
