//! crates/logging/src/line_mode.rs
//! Line termination policy of the built-in sink.

use std::str::FromStr;

use crate::error::ConfigError;

/// Controls how the end of a log line is written.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LineMode {
    /// Append `\n` unless the message already ends with one, so every
    /// emitted call occupies exactly one line.
    #[default]
    Terminated,
    /// Write the message bytes untouched. Scripts must supply their own
    /// trailing newline.
    Verbatim,
}

impl LineMode {
    /// Reports whether a newline must follow `message` under this mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::LineMode;
    ///
    /// assert!(LineMode::Terminated.needs_newline("ready"));
    /// assert!(!LineMode::Terminated.needs_newline("ready\n"));
    /// assert!(!LineMode::Verbatim.needs_newline("ready"));
    /// ```
    #[must_use]
    pub fn needs_newline(self, message: &str) -> bool {
        matches!(self, Self::Terminated) && !message.ends_with('\n')
    }

    /// Name accepted by `LUA_LOG_LINE_MODE`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Terminated => "terminated",
            Self::Verbatim => "verbatim",
        }
    }
}

impl FromStr for LineMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "terminated" | "newline" => Ok(Self::Terminated),
            "verbatim" | "raw" => Ok(Self::Verbatim),
            _ => Err(ConfigError::UnknownLineMode(value.trim().to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_terminated() {
        assert_eq!(LineMode::default(), LineMode::Terminated);
    }

    #[test]
    fn terminated_skips_existing_newline() {
        assert!(LineMode::Terminated.needs_newline(""));
        assert!(!LineMode::Terminated.needs_newline("done\n"));
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!("RAW".parse::<LineMode>(), Ok(LineMode::Verbatim));
        assert_eq!("newline".parse::<LineMode>(), Ok(LineMode::Terminated));
        assert_eq!(
            "crlf".parse::<LineMode>(),
            Err(ConfigError::UnknownLineMode("crlf".to_owned()))
        );
    }
}
