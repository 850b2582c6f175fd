#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging/src/lib.rs
//!
//! # Overview
//!
//! `logging` holds the parts of the lualog bridge that do not touch an output
//! device: the ordered [`Severity`] levels, the write-once [`LevelStore`], the
//! environment-driven [`LogConfig`], the per-call [`LogRecord`], the
//! [`LineFormatter`] that renders the fixed line layout, and the [`Emitter`]
//! that exposes one method per severity on top of any [`LogSink`].
//!
//! # Design
//!
//! Configuration is read once and injected. An [`Emitter`] owns its sink and
//! the sink owns its threshold, so tests and embedders can run several
//! independently configured emitters in one process. The process-wide
//! [`LevelStore::global`] exists for the host binding layer only.
//!
//! # Invariants
//!
//! - A call emits iff its severity is `<=` the threshold; a
//!   [`Severity::None`] threshold emits nothing.
//! - Source paths are reduced to their last `/` segment before any sink sees
//!   them.
//! - Rendered lines follow `MM/DD HH:MM:SS:mmm|P<pid>T<tid>|L|file:line|message`.
//!
//! # Errors
//!
//! [`ConfigError`] describes unusable configuration values. The lenient
//! constructors recover from it by falling back to defaults; log calls
//! themselves never fail.
//!
//! # Examples
//!
//! ```
//! use logging::{LineFormatter, LineMode, LogRecord, ParsedLine, Severity};
//!
//! let record = LogRecord::new(Severity::Error, "a/b.lua", 10, "x");
//! let mut line = String::new();
//! LineFormatter::new(LineMode::Terminated).format_into(&record, &mut line);
//!
//! assert!(line.ends_with("|E|b.lua:10|x\n"));
//! let parsed = ParsedLine::parse(&line).unwrap();
//! assert_eq!(parsed.severity, Severity::Error);
//! ```
//!
//! # See also
//!
//! - `logging-sink` for the console, file, tracing and syslog sinks.

mod config;
mod emitter;
mod error;
mod format;
mod level_store;
mod levels;
mod line_mode;
mod record;

pub use config::{
    BACKEND_ENV, BackendKind, DEFAULT_SYSLOG_TAG, Destination, FILE_ENV, LEVEL_ENV,
    LINE_MODE_ENV, LogConfig, SYSLOG_FACILITY_ENV, SYSLOG_TAG_ENV, SyslogFacility,
    resolve_threshold,
};
pub use emitter::{Emitter, LogSink};
pub use error::ConfigError;
pub use format::{LineFormatter, ParsedLine, current_thread_id, local_now, prime_local_offset};
pub use level_store::LevelStore;
pub use levels::Severity;
pub use line_mode::LineMode;
pub use record::{LogRecord, strip_file_name};
