//! crates/logging/src/format.rs
//! Rendering of the `MM/DD HH:MM:SS:mmm|P<pid>T<tid>|L|file:line|message` layout.
//!
//! The layout is consumed by external log scrapers, so field order, padding
//! and separators are fixed. Timestamps use local wall-clock time. The local
//! UTC offset is resolved once (see [`prime_local_offset`]) because the
//! platform lookup is only sound before the host spawns threads; if it cannot
//! be determined, UTC is used.

use std::fmt::Write as _;
use std::sync::OnceLock;

use time::{OffsetDateTime, UtcOffset};

use crate::levels::Severity;
use crate::line_mode::LineMode;
use crate::record::LogRecord;

static LOCAL_OFFSET: OnceLock<UtcOffset> = OnceLock::new();

/// Resolves and caches the local UTC offset.
///
/// Call this during start-up, before the host creates worker threads. Later
/// calls return the cached value.
pub fn prime_local_offset() -> UtcOffset {
    *LOCAL_OFFSET.get_or_init(|| match UtcOffset::current_local_offset() {
        Ok(offset) => offset,
        Err(error) => {
            tracing::debug!(%error, "local UTC offset unavailable, timestamps use UTC");
            UtcOffset::UTC
        }
    })
}

/// Returns the current local wall-clock time.
pub fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(prime_local_offset())
}

/// Identifier of the calling thread as written after `T` in the prefix.
#[cfg(unix)]
#[allow(unsafe_code)]
pub fn current_thread_id() -> u64 {
    // SAFETY: pthread_self has no preconditions and always succeeds.
    let id = unsafe { libc::pthread_self() };
    id as u64
}

/// Identifier of the calling thread as written after `T` in the prefix.
#[cfg(not(unix))]
pub fn current_thread_id() -> u64 {
    use std::sync::atomic::{AtomicU64, Ordering};

    static NEXT: AtomicU64 = AtomicU64::new(1);
    thread_local! {
        static ID: u64 = NEXT.fetch_add(1, Ordering::Relaxed);
    }
    ID.with(|id| *id)
}

/// Renders log lines for one process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineFormatter {
    pid: u32,
    line_mode: LineMode,
}

impl LineFormatter {
    /// Creates a formatter for the current process.
    pub fn new(line_mode: LineMode) -> Self {
        Self::with_pid(std::process::id(), line_mode)
    }

    /// Creates a formatter that reports `pid` instead of the current process id.
    pub const fn with_pid(pid: u32, line_mode: LineMode) -> Self {
        Self { pid, line_mode }
    }

    /// Line termination applied by this formatter.
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Appends the rendered line for `record` to `buf` using the current time
    /// and calling thread.
    pub fn format_into(&self, record: &LogRecord<'_>, buf: &mut String) {
        self.format_at(record, local_now(), current_thread_id(), buf);
    }

    /// Appends the rendered line for `record` to `buf` with an explicit
    /// timestamp and thread id.
    pub fn format_at(
        &self,
        record: &LogRecord<'_>,
        timestamp: OffsetDateTime,
        thread_id: u64,
        buf: &mut String,
    ) {
        // Writing into a String cannot fail.
        let _ = write!(
            buf,
            "{:02}/{:02} {:02}:{:02}:{:02}:{:03}|P{}T{}|{}|{}:{}|",
            u8::from(timestamp.month()),
            timestamp.day(),
            timestamp.hour(),
            timestamp.minute(),
            timestamp.second(),
            timestamp.millisecond(),
            self.pid,
            thread_id,
            record.severity().tag(),
            record.file(),
            record.line(),
        );
        buf.push_str(record.message());
        if self.line_mode.needs_newline(record.message()) {
            buf.push('\n');
        }
    }
}

impl Default for LineFormatter {
    fn default() -> Self {
        Self::new(LineMode::default())
    }
}

/// Fields recovered from a rendered line.
///
/// Mirrors what downstream scrapers extract; used to verify output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    /// `MM/DD HH:MM:SS:mmm` timestamp text.
    pub timestamp: &'a str,
    /// Process id.
    pub pid: u32,
    /// Thread id.
    pub thread_id: u64,
    /// Level parsed from the tag character.
    pub severity: Severity,
    /// File name column.
    pub file: &'a str,
    /// Line number column.
    pub line: i64,
    /// Message text without the trailing newline.
    pub message: &'a str,
}

impl<'a> ParsedLine<'a> {
    /// Parses one rendered line, returning `None` if it does not match the
    /// layout. The message may itself contain `|`.
    pub fn parse(line: &'a str) -> Option<Self> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let mut fields = line.splitn(5, '|');
        let timestamp = fields.next()?;
        let ids = fields.next()?;
        let tag = fields.next()?;
        let location = fields.next()?;
        let message = fields.next()?;

        if timestamp.len() != "MM/DD HH:MM:SS:mmm".len() {
            return None;
        }

        let (pid, thread_id) = ids.strip_prefix('P')?.split_once('T')?;
        let severity = match tag {
            "F" => Severity::Fatal,
            "E" => Severity::Error,
            "W" => Severity::Warn,
            "I" => Severity::Info,
            "D" => Severity::Debug,
            _ => return None,
        };
        let (file, line_number) = location.rsplit_once(':')?;

        Some(Self {
            timestamp,
            pid: pid.parse().ok()?,
            thread_id: thread_id.parse().ok()?,
            severity,
            file,
            line: line_number.parse().ok()?,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn render(record: &LogRecord<'_>, mode: LineMode) -> String {
        let mut buf = String::new();
        LineFormatter::with_pid(4321, mode).format_at(
            record,
            datetime!(2024-03-07 09:05:02.045 UTC),
            77,
            &mut buf,
        );
        buf
    }

    #[test]
    fn renders_exact_layout() {
        let record = LogRecord::new(Severity::Error, "a/b.lua", 10, "x");
        assert_eq!(
            render(&record, LineMode::Terminated),
            "03/07 09:05:02:045|P4321T77|E|b.lua:10|x\n"
        );
    }

    #[test]
    fn verbatim_mode_adds_nothing() {
        let record = LogRecord::new(Severity::Info, "b.lua", 1, "no newline");
        assert_eq!(
            render(&record, LineMode::Verbatim),
            "03/07 09:05:02:045|P4321T77|I|b.lua:1|no newline"
        );
    }

    #[test]
    fn terminated_mode_keeps_single_newline() {
        let record = LogRecord::new(Severity::Debug, "b.lua", 2, "done\n");
        let line = render(&record, LineMode::Terminated);
        assert!(line.ends_with("|done\n"));
        assert!(!line.ends_with("\n\n"));
    }

    #[test]
    fn message_is_not_a_format_string() {
        let record = LogRecord::new(Severity::Warn, "b.lua", 3, "100% {} %s");
        assert!(render(&record, LineMode::Terminated).ends_with("|100% {} %s\n"));
    }

    #[test]
    fn negative_line_is_rendered_as_is() {
        let record = LogRecord::new(Severity::Warn, "b.lua", -1, "m");
        assert!(render(&record, LineMode::Terminated).contains("|b.lua:-1|"));
    }

    #[test]
    fn parse_recovers_every_field() {
        let record = LogRecord::new(Severity::Fatal, "dir/main.lua", 99, "a|b");
        let rendered = render(&record, LineMode::Terminated);
        let parsed = ParsedLine::parse(&rendered).expect("well formed");

        assert_eq!(parsed.timestamp, "03/07 09:05:02:045");
        assert_eq!(parsed.pid, 4321);
        assert_eq!(parsed.thread_id, 77);
        assert_eq!(parsed.severity, Severity::Fatal);
        assert_eq!(parsed.file, "main.lua");
        assert_eq!(parsed.line, 99);
        assert_eq!(parsed.message, "a|b");
    }

    #[test]
    fn parse_rejects_foreign_lines() {
        assert!(ParsedLine::parse("hello world").is_none());
        assert!(ParsedLine::parse("03/07 09:05:02:045|P1T2|X|a:1|m").is_none());
        assert!(ParsedLine::parse("03/07 09:05:02|P1T2|E|a:1|m").is_none());
    }

    #[test]
    fn live_format_uses_current_process() {
        let record = LogRecord::new(Severity::Info, "x.lua", 5, "live");
        let mut buf = String::new();
        LineFormatter::default().format_into(&record, &mut buf);

        let parsed = ParsedLine::parse(&buf).expect("well formed");
        assert_eq!(parsed.pid, std::process::id());
        assert_eq!(parsed.thread_id, current_thread_id());
        assert_eq!(parsed.message, "live");
    }

    #[test]
    fn thread_ids_differ_across_threads() {
        let here = current_thread_id();
        let there = std::thread::spawn(current_thread_id).join().unwrap();
        assert_ne!(here, there);
    }
}
