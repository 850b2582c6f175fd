//! crates/logging-sink/src/external.rs
//! Sinks that hand log calls to another logging system.

use logging::{LogRecord, LogSink, Severity};

/// A logging system outside this crate that filters and stores entries itself.
///
/// Backends receive the stripped file name, the line and the message
/// together with the call severity. They decide on their own whether the
/// entry is kept.
pub trait ExternalBackend: Send + Sync {
    /// Records one entry.
    fn log(&self, severity: Severity, file: &str, line: i64, message: &str);

    /// Flushes buffered entries.
    fn flush(&self) {}
}

/// Sink that forwards every call to an [`ExternalBackend`].
///
/// The built-in threshold is not applied and [`LogSink::emit`] always returns
/// `false`: whether the backend kept the entry is not observable, so callers
/// must not count on the return value in this mode.
#[derive(Debug)]
pub struct ExternalSink<B> {
    backend: B,
}

impl<B> ExternalSink<B> {
    /// Wraps `backend`.
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Borrows the backend.
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Consumes the sink and returns the backend.
    pub fn into_inner(self) -> B {
        self.backend
    }
}

impl<B> LogSink for ExternalSink<B>
where
    B: ExternalBackend,
{
    fn emit(&self, record: &LogRecord<'_>) -> bool {
        if record.severity() != Severity::None {
            self.backend.log(
                record.severity(),
                record.file(),
                record.line(),
                record.message(),
            );
        }
        false
    }

    fn flush(&self) {
        self.backend.flush();
    }
}
