//! crates/logging/src/emitter.rs
//! The five leveled entry points and the sink capability behind them.

use std::sync::Arc;

use crate::levels::Severity;
use crate::record::LogRecord;

/// Destination capability used by [`Emitter`].
///
/// Implementations decide whether a record is written and report that
/// decision. The built-in sink applies the configured threshold and returns
/// `true` for every line it writes. External sinks delegate filtering to their
/// backend and always return `false`, because the backend's decision is not
/// observable from here.
pub trait LogSink: Send + Sync {
    /// Handles one record and reports whether it was emitted.
    fn emit(&self, record: &LogRecord<'_>) -> bool;

    /// Flushes buffered output. Sinks that write through do nothing.
    fn flush(&self) {}
}

impl<S> LogSink for Box<S>
where
    S: LogSink + ?Sized,
{
    fn emit(&self, record: &LogRecord<'_>) -> bool {
        (**self).emit(record)
    }

    fn flush(&self) {
        (**self).flush();
    }
}

impl<S> LogSink for Arc<S>
where
    S: LogSink + ?Sized,
{
    fn emit(&self, record: &LogRecord<'_>) -> bool {
        (**self).emit(record)
    }

    fn flush(&self) {
        (**self).flush();
    }
}

/// Front end handed to the host: one method per severity.
///
/// Every method strips the directory from `file`, forwards the call to the
/// sink and returns whether a line was emitted. Calls never panic and never
/// report I/O failures.
///
/// # Examples
///
/// ```
/// use logging::{Emitter, LogRecord, LogSink, Severity};
///
/// struct Count(std::sync::atomic::AtomicUsize);
///
/// impl LogSink for Count {
///     fn emit(&self, record: &LogRecord<'_>) -> bool {
///         self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
///         record.severity() <= Severity::Warn
///     }
/// }
///
/// let emitter = Emitter::new(Count(Default::default()));
/// assert!(emitter.error("a/b.lua", 10, "x"));
/// assert!(!emitter.debug("a/b.lua", 11, "y"));
/// ```
#[derive(Debug)]
pub struct Emitter<S = Box<dyn LogSink>> {
    sink: S,
}

impl<S> Emitter<S>
where
    S: LogSink,
{
    /// Creates an emitter around `sink`.
    pub const fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Borrows the sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the emitter and returns the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Logs `message` at `severity`.
    pub fn log(&self, severity: Severity, file: &str, line: i64, message: &str) -> bool {
        self.sink.emit(&LogRecord::new(severity, file, line, message))
    }

    /// Logs at [`Severity::Fatal`].
    pub fn fatal(&self, file: &str, line: i64, message: &str) -> bool {
        self.log(Severity::Fatal, file, line, message)
    }

    /// Logs at [`Severity::Error`].
    pub fn error(&self, file: &str, line: i64, message: &str) -> bool {
        self.log(Severity::Error, file, line, message)
    }

    /// Logs at [`Severity::Warn`].
    pub fn warn(&self, file: &str, line: i64, message: &str) -> bool {
        self.log(Severity::Warn, file, line, message)
    }

    /// Logs at [`Severity::Info`].
    pub fn info(&self, file: &str, line: i64, message: &str) -> bool {
        self.log(Severity::Info, file, line, message)
    }

    /// Logs at [`Severity::Debug`].
    pub fn debug(&self, file: &str, line: i64, message: &str) -> bool {
        self.log(Severity::Debug, file, line, message)
    }

    /// Flushes the sink.
    pub fn flush(&self) {
        self.sink.flush();
    }
}

impl Emitter<Box<dyn LogSink>> {
    /// Creates an emitter that erases the concrete sink type.
    pub fn boxed<S>(sink: S) -> Self
    where
        S: LogSink + 'static,
    {
        Self::new(Box::new(sink))
    }
}

impl std::fmt::Debug for dyn LogSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn LogSink")
    }
}
