//! crates/logging/src/levels.rs
//! Ordered severity levels shared by the emitter and every sink.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Severity of a log call, ordered from silent to most verbose.
///
/// The numeric values are part of the configuration contract: `LUA_LOG_LEVEL`
/// accepts either the name or the number of a variant. A call is emitted when
/// its severity compares less than or equal to the configured threshold, so
/// [`Severity::None`] as a threshold suppresses everything and
/// [`Severity::Debug`] lets everything through.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Severity {
    /// Nothing is emitted.
    None = 0,
    /// Unrecoverable failures.
    Fatal = 1,
    /// Errors the caller survived.
    Error = 2,
    /// Suspicious conditions.
    #[default]
    Warn = 3,
    /// Progress and state changes.
    Info = 4,
    /// Developer diagnostics.
    Debug = 5,
}

impl Severity {
    /// Every level that a log call can carry, most urgent first.
    pub const CALLABLE: [Self; 5] = [
        Self::Fatal,
        Self::Error,
        Self::Warn,
        Self::Info,
        Self::Debug,
    ];

    /// Threshold used when nothing (or something unusable) is configured.
    pub const DEFAULT_THRESHOLD: Self = Self::Warn;

    /// Converts a raw level number into a severity.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Fatal),
            2 => Some(Self::Error),
            3 => Some(Self::Warn),
            4 => Some(Self::Info),
            5 => Some(Self::Debug),
            _ => None,
        }
    }

    /// Returns the numeric value of the level.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Single character written into the level column of a log line.
    ///
    /// [`Severity::None`] never reaches a sink; it renders as `-`.
    pub const fn tag(self) -> char {
        match self {
            Self::None => '-',
            Self::Fatal => 'F',
            Self::Error => 'E',
            Self::Warn => 'W',
            Self::Info => 'I',
            Self::Debug => 'D',
        }
    }

    /// Lowercase name accepted by the configuration parser.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Fatal => "fatal",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    /// Reports whether a call at this severity passes `threshold`.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::Severity;
    ///
    /// assert!(Severity::Error.passes(Severity::Warn));
    /// assert!(Severity::Warn.passes(Severity::Warn));
    /// assert!(!Severity::Debug.passes(Severity::Warn));
    /// assert!(!Severity::Fatal.passes(Severity::None));
    /// ```
    pub fn passes(self, threshold: Self) -> bool {
        self != Self::None && self <= threshold
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ConfigError;

    /// Parses a level name (case-insensitive) or a number in `0..=5`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::Empty);
        }

        if let Ok(number) = trimmed.parse::<i64>() {
            return u8::try_from(number)
                .ok()
                .and_then(Self::from_u8)
                .ok_or(ConfigError::LevelOutOfRange(number));
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(Self::None),
            "fatal" => Ok(Self::Fatal),
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            _ => Err(ConfigError::UnknownLevel(trimmed.to_owned())),
        }
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.as_u8()
    }
}

impl TryFrom<u8> for Severity {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, ConfigError> {
        Self::from_u8(value).ok_or(ConfigError::LevelOutOfRange(i64::from(value)))
    }
}
