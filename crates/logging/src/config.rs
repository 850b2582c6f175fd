//! crates/logging/src/config.rs
//! Process configuration read once from the environment.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::levels::Severity;
use crate::line_mode::LineMode;

/// Minimum severity to emit, by name or number.
pub const LEVEL_ENV: &str = "LUA_LOG_LEVEL";
/// Backend selector: `builtin`, `tracing` or `syslog`.
pub const BACKEND_ENV: &str = "LUA_LOG_BACKEND";
/// Optional file the built-in backend appends to instead of stdout.
pub const FILE_ENV: &str = "LUA_LOG_FILE";
/// Line termination: `terminated` or `verbatim`.
pub const LINE_MODE_ENV: &str = "LUA_LOG_LINE_MODE";
/// Ident passed to syslog by the syslog backend.
pub const SYSLOG_TAG_ENV: &str = "LUA_LOG_SYSLOG_TAG";
/// Facility used by the syslog backend: `user`, `daemon` or `local0`-`local7`.
pub const SYSLOG_FACILITY_ENV: &str = "LUA_LOG_SYSLOG_FACILITY";

/// Syslog ident used when [`SYSLOG_TAG_ENV`] is unset.
pub const DEFAULT_SYSLOG_TAG: &str = "lualog";

/// Which sink receives log calls.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BackendKind {
    /// Format lines locally and apply the threshold.
    #[default]
    Builtin,
    /// Forward calls as `tracing` events.
    Tracing,
    /// Forward calls to syslog(3).
    Syslog,
}

impl BackendKind {
    /// Name accepted by [`BACKEND_ENV`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Builtin => "builtin",
            Self::Tracing => "tracing",
            Self::Syslog => "syslog",
        }
    }

    /// Reports whether calls are delegated to an external backend.
    pub const fn is_external(self) -> bool {
        !matches!(self, Self::Builtin)
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "builtin" | "stdout" => Ok(Self::Builtin),
            "tracing" => Ok(Self::Tracing),
            "syslog" => Ok(Self::Syslog),
            _ => Err(ConfigError::UnknownBackend(value.trim().to_owned())),
        }
    }
}

/// Syslog facility selected by [`SYSLOG_FACILITY_ENV`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SyslogFacility {
    /// Generic user-level messages.
    #[default]
    User,
    /// System daemons.
    Daemon,
    /// Reserved for local use.
    Local0,
    /// Reserved for local use.
    Local1,
    /// Reserved for local use.
    Local2,
    /// Reserved for local use.
    Local3,
    /// Reserved for local use.
    Local4,
    /// Reserved for local use.
    Local5,
    /// Reserved for local use.
    Local6,
    /// Reserved for local use.
    Local7,
}

impl SyslogFacility {
    /// Parses a facility name, case-insensitively.
    ///
    /// ```
    /// use logging::SyslogFacility;
    ///
    /// assert_eq!(SyslogFacility::from_name("LOCAL3"), Some(SyslogFacility::Local3));
    /// assert_eq!(SyslogFacility::from_name("kern"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "user" => Some(Self::User),
            "daemon" => Some(Self::Daemon),
            "local0" => Some(Self::Local0),
            "local1" => Some(Self::Local1),
            "local2" => Some(Self::Local2),
            "local3" => Some(Self::Local3),
            "local4" => Some(Self::Local4),
            "local5" => Some(Self::Local5),
            "local6" => Some(Self::Local6),
            "local7" => Some(Self::Local7),
            _ => None,
        }
    }

    /// Lowercase facility name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Daemon => "daemon",
            Self::Local0 => "local0",
            Self::Local1 => "local1",
            Self::Local2 => "local2",
            Self::Local3 => "local3",
            Self::Local4 => "local4",
            Self::Local5 => "local5",
            Self::Local6 => "local6",
            Self::Local7 => "local7",
        }
    }
}

impl fmt::Display for SyslogFacility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyslogFacility {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_name(value).ok_or_else(|| ConfigError::UnknownFacility(value.trim().to_owned()))
    }
}

/// Where the built-in backend writes.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Destination {
    /// Process standard output.
    #[default]
    Stdout,
    /// Append to a file.
    File(PathBuf),
}

/// Immutable logging configuration injected into an emitter.
///
/// Built once at start-up, usually from the environment. Nothing mutates it
/// afterwards; every emitter owns its own copy of the threshold.
///
/// # Examples
///
/// ```
/// use logging::{BackendKind, LogConfig, Severity};
///
/// let config = LogConfig::from_lookup(|key| match key {
///     "LUA_LOG_LEVEL" => Some("debug".to_owned()),
///     _ => None,
/// });
/// assert_eq!(config.threshold, Severity::Debug);
/// assert_eq!(config.backend, BackendKind::Builtin);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogConfig {
    /// Most verbose severity that is still emitted.
    pub threshold: Severity,
    /// Sink selection.
    pub backend: BackendKind,
    /// Output target of the built-in backend.
    pub destination: Destination,
    /// Line termination of the built-in backend.
    pub line_mode: LineMode,
    /// Ident for the syslog backend.
    pub syslog_tag: String,
    /// Facility for the syslog backend.
    pub syslog_facility: SyslogFacility,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            threshold: Severity::DEFAULT_THRESHOLD,
            backend: BackendKind::default(),
            destination: Destination::default(),
            line_mode: LineMode::default(),
            syslog_tag: DEFAULT_SYSLOG_TAG.to_owned(),
            syslog_facility: SyslogFacility::default(),
        }
    }
}

impl LogConfig {
    /// Creates a built-in configuration with the given threshold.
    pub fn with_threshold(threshold: Severity) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// Invalid values fall back to their defaults; see [`from_lookup`](Self::from_lookup).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, recovering from bad values.
    ///
    /// Each unusable setting is reported with `tracing::warn!` and replaced by
    /// its default. An unset or empty level yields [`Severity::DEFAULT_THRESHOLD`]
    /// silently.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            threshold: resolve_threshold(lookup(LEVEL_ENV).as_deref()),
            backend: setting(&lookup, BACKEND_ENV).unwrap_or(defaults.backend),
            destination: destination(&lookup),
            line_mode: setting(&lookup, LINE_MODE_ENV).unwrap_or(defaults.line_mode),
            syslog_tag: non_empty(lookup(SYSLOG_TAG_ENV)).unwrap_or(defaults.syslog_tag),
            syslog_facility: setting(&lookup, SYSLOG_FACILITY_ENV)
                .unwrap_or(defaults.syslog_facility),
        }
    }
}

/// Resolves a threshold from an optional raw value, falling back to
/// [`Severity::DEFAULT_THRESHOLD`].
pub fn resolve_threshold(value: Option<&str>) -> Severity {
    match value.map(str::trim).filter(|value| !value.is_empty()) {
        None => Severity::DEFAULT_THRESHOLD,
        Some(raw) => raw.parse().unwrap_or_else(|error: ConfigError| {
            tracing::warn!(
                variable = LEVEL_ENV,
                %error,
                fallback = %Severity::DEFAULT_THRESHOLD,
                "ignoring invalid log level"
            );
            Severity::DEFAULT_THRESHOLD
        }),
    }
}

fn setting<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr<Err = ConfigError>,
    F: Fn(&str) -> Option<String>,
{
    let raw = non_empty(lookup(key))?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(variable = key, %error, "ignoring invalid logging setting");
            None
        }
    }
}

fn destination<F>(lookup: &F) -> Destination
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup(FILE_ENV)).map_or(Destination::Stdout, |path| Destination::File(path.into()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
