#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` provides the destinations behind a [`logging::Emitter`]:
//!
//! - [`BuiltinSink`] applies the threshold and writes formatted lines to
//!   stdout, a file, or any [`std::io::Write`] implementor.
//! - [`ExternalSink`] hands every call to an [`ExternalBackend`]; the crate
//!   ships [`TracingBackend`] and, on unix, [`syslog::SyslogBackend`].
//!
//! # Invariants
//!
//! - The built-in sink writes zero or one line per call and flushes after
//!   each line. One mutex serializes writes; formatting happens outside it.
//! - External sinks never apply the built-in threshold and always report
//!   `false`.
//! - No sink panics or returns an error to the caller; I/O failures are
//!   counted and reported through `tracing`.
//!
//! # Examples
//!
//! ```
//! use logging::{Emitter, LogConfig, Severity};
//!
//! let emitter = Emitter::new(logging_sink::sink_for(&LogConfig::with_threshold(Severity::None)));
//! assert!(!emitter.fatal("main.lua", 1, "suppressed"));
//! ```

mod builtin;
mod external;
#[cfg(unix)]
pub mod syslog;
mod tracing_backend;

pub use builtin::BuiltinSink;
pub use external::{ExternalBackend, ExternalSink};
#[cfg(feature = "tracing")]
pub use tracing_backend::init_tracing_backend;
pub use tracing_backend::{TRACING_TARGET, TracingBackend};

use logging::{BackendKind, Destination, LogConfig, LogSink};

/// Builds the sink described by `config`.
///
/// A log file that cannot be opened falls back to stdout. Selecting the
/// syslog backend on a platform without syslog falls back to the built-in
/// sink. Both fallbacks are reported with `tracing::warn!`.
pub fn sink_for(config: &LogConfig) -> Box<dyn LogSink> {
    match config.backend {
        BackendKind::Builtin => builtin_sink(config),
        BackendKind::Tracing => {
            #[cfg(feature = "tracing")]
            init_tracing_backend(config.threshold);
            Box::new(ExternalSink::new(TracingBackend))
        }
        #[cfg(unix)]
        BackendKind::Syslog => Box::new(ExternalSink::new(syslog::SyslogBackend::open(
            &config.syslog_tag,
            config.syslog_facility,
        ))),
        #[cfg(not(unix))]
        BackendKind::Syslog => {
            tracing::warn!("syslog is unavailable on this platform, using the built-in sink");
            builtin_sink(config)
        }
    }
}

fn builtin_sink(config: &LogConfig) -> Box<dyn LogSink> {
    match &config.destination {
        Destination::Stdout => Box::new(BuiltinSink::stdout(config.threshold, config.line_mode)),
        Destination::File(path) => {
            match BuiltinSink::open_file(path, config.threshold, config.line_mode) {
                Ok(sink) => Box::new(sink),
                Err(error) => {
                    tracing::warn!(
                        path = %path.display(),
                        %error,
                        "cannot open log file, writing to stdout"
                    );
                    Box::new(BuiltinSink::stdout(config.threshold, config.line_mode))
                }
            }
        }
    }
}
