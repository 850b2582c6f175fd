//! crates/logging-sink/src/builtin.rs
//! Console and file sink that applies the threshold itself.

use std::fs::{File, OpenOptions};
use std::io::{self, Stdout, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use logging::{LineFormatter, LineMode, LogRecord, LogSink, Severity};

/// Threshold-filtering sink that renders lines into an [`io::Write`] target.
///
/// Each accepted record is rendered into a private buffer first; only the
/// write and flush run under the sink's mutex, so concurrent callers never
/// interleave partial lines. The writer is flushed after every line so
/// nothing is lost if the host dies right after a call.
///
/// Write failures do not change the reported outcome: a record that passed
/// the threshold reports `true` even if the device rejected the bytes. The
/// sink counts such failures (see [`write_failures`](Self::write_failures))
/// and reports the first one through `tracing`.
///
/// # Examples
///
/// ```
/// use logging::{Emitter, LineMode, Severity};
/// use logging_sink::BuiltinSink;
///
/// let emitter = Emitter::new(BuiltinSink::new(Vec::new(), Severity::Warn, LineMode::Terminated));
/// assert!(emitter.error("a/b.lua", 10, "x"));
/// assert!(!emitter.debug("a/b.lua", 11, "y"));
///
/// let output = String::from_utf8(emitter.into_sink().into_inner()).unwrap();
/// assert_eq!(output.lines().count(), 1);
/// assert!(output.ends_with("|E|b.lua:10|x\n"));
/// ```
#[derive(Debug)]
pub struct BuiltinSink<W> {
    writer: Mutex<W>,
    threshold: Severity,
    formatter: LineFormatter,
    write_failures: AtomicU64,
}

impl<W> BuiltinSink<W> {
    /// Creates a sink writing to `writer`.
    pub fn new(writer: W, threshold: Severity, line_mode: LineMode) -> Self {
        Self::with_formatter(writer, threshold, LineFormatter::new(line_mode))
    }

    /// Creates a sink with an explicit formatter.
    pub fn with_formatter(writer: W, threshold: Severity, formatter: LineFormatter) -> Self {
        Self {
            writer: Mutex::new(writer),
            threshold,
            formatter,
            write_failures: AtomicU64::new(0),
        }
    }

    /// Threshold applied by this sink.
    pub const fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Line termination applied by this sink.
    pub const fn line_mode(&self) -> LineMode {
        self.formatter.line_mode()
    }

    /// Number of lines whose write or flush failed.
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    /// Runs `f` with exclusive access to the writer.
    pub fn with_writer<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.lock())
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, W> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BuiltinSink<Stdout> {
    /// Creates a sink writing to the process standard output.
    pub fn stdout(threshold: Severity, line_mode: LineMode) -> Self {
        Self::new(io::stdout(), threshold, line_mode)
    }
}

impl BuiltinSink<File> {
    /// Opens `path` for appending, creating it if needed.
    pub fn open_file(path: &Path, threshold: Severity, line_mode: LineMode) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file, threshold, line_mode))
    }
}

impl<W> BuiltinSink<W>
where
    W: Write,
{
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self.lock();
        writer.write_all(line.as_bytes())?;
        writer.flush()
    }
}

impl<W> LogSink for BuiltinSink<W>
where
    W: Write + Send,
{
    fn emit(&self, record: &LogRecord<'_>) -> bool {
        if !record.severity().passes(self.threshold) {
            return false;
        }

        let mut line = String::with_capacity(64 + record.message().len());
        self.formatter.format_into(record, &mut line);

        if let Err(error) = self.write_line(&line) {
            if self.write_failures.fetch_add(1, Ordering::Relaxed) == 0 {
                tracing::debug!(%error, "log line could not be written");
            }
        }
        true
    }

    fn flush(&self) {
        if let Err(error) = self.lock().flush() {
            tracing::debug!(%error, "log sink flush failed");
        }
    }
}
