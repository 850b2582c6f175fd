//! crates/logging/src/record.rs
//! Per-call log record and source path handling.

use crate::levels::Severity;

/// Returns the last `/`-separated segment of `file`.
///
/// Strings without a separator, including the empty string, come back
/// unchanged. Applying the function twice yields the same result as applying
/// it once.
///
/// # Examples
///
/// ```
/// use logging::strip_file_name;
///
/// assert_eq!(strip_file_name("scripts/app/main.lua"), "main.lua");
/// assert_eq!(strip_file_name("main.lua"), "main.lua");
/// assert_eq!(strip_file_name(""), "");
/// ```
pub fn strip_file_name(file: &str) -> &str {
    match file.rfind('/') {
        Some(pos) => &file[pos + 1..],
        None => file,
    }
}

/// A single log call, borrowed from the caller for the duration of `emit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogRecord<'a> {
    severity: Severity,
    file: &'a str,
    line: i64,
    message: &'a str,
}

impl<'a> LogRecord<'a> {
    /// Builds a record, stripping any directory prefix from `file`.
    pub fn new(severity: Severity, file: &'a str, line: i64, message: &'a str) -> Self {
        Self {
            severity,
            file: strip_file_name(file),
            line,
            message,
        }
    }

    /// Severity of the call.
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Source file name without its directory.
    pub const fn file(&self) -> &'a str {
        self.file
    }

    /// Source line as supplied by the caller; negative values pass through.
    pub const fn line(&self) -> i64 {
        self.line
    }

    /// Message text, written verbatim.
    pub const fn message(&self) -> &'a str {
        self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_nested_directories() {
        assert_eq!(strip_file_name("a/b/c.lua"), "c.lua");
        assert_eq!(strip_file_name("/abs/path/x.lua"), "x.lua");
    }

    #[test]
    fn keeps_plain_names() {
        assert_eq!(strip_file_name("c.lua"), "c.lua");
        assert_eq!(strip_file_name(""), "");
    }

    #[test]
    fn trailing_separator_yields_empty_name() {
        assert_eq!(strip_file_name("dir/"), "");
    }

    #[test]
    fn backslashes_are_not_separators() {
        assert_eq!(strip_file_name(r"C:\scripts\x.lua"), r"C:\scripts\x.lua");
    }

    #[test]
    fn record_strips_on_construction() {
        let record = LogRecord::new(Severity::Info, "lib/util.lua", 42, "ready");
        assert_eq!(record.file(), "util.lua");
        assert_eq!(record.line(), 42);
        assert_eq!(record.severity(), Severity::Info);
        assert_eq!(record.message(), "ready");
    }

    #[test]
    fn negative_lines_pass_through() {
        let record = LogRecord::new(Severity::Warn, "x.lua", -3, "");
        assert_eq!(record.line(), -3);
    }

    proptest! {
        #[test]
        fn stripping_is_idempotent(path in ".*") {
            let once = strip_file_name(&path);
            prop_assert_eq!(strip_file_name(once), once);
        }

        #[test]
        fn stripped_name_has_no_separator(path in "[a-z/._]{0,40}") {
            prop_assert!(!strip_file_name(&path).contains('/'));
        }
    }
}
