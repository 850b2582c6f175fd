//! crates/logging-sink/src/tracing_backend.rs
//!
//! Backend that turns log calls into `tracing` events.
//!
//! Events use the `lualog` target and carry `file`, `line` and `message`
//! fields. Fatal calls are recorded at `ERROR` with `fatal = true`, since
//! `tracing` has no more urgent level. Filtering is left to whatever
//! subscriber the process installs.

use logging::Severity;
use tracing::Level;

use crate::external::ExternalBackend;

/// Target attached to every forwarded event.
pub const TRACING_TARGET: &str = "lualog";

/// Forwards log calls to the active `tracing` subscriber.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TracingBackend;

impl TracingBackend {
    /// Level a severity is recorded at.
    pub const fn level_for(severity: Severity) -> Option<Level> {
        match severity {
            Severity::None => None,
            Severity::Fatal | Severity::Error => Some(Level::ERROR),
            Severity::Warn => Some(Level::WARN),
            Severity::Info => Some(Level::INFO),
            Severity::Debug => Some(Level::DEBUG),
        }
    }
}

impl ExternalBackend for TracingBackend {
    fn log(&self, severity: Severity, file: &str, line: i64, message: &str) {
        match severity {
            Severity::None => {}
            Severity::Fatal => {
                tracing::error!(target: TRACING_TARGET, fatal = true, file, line, "{message}");
            }
            Severity::Error => tracing::error!(target: TRACING_TARGET, file, line, "{message}"),
            Severity::Warn => tracing::warn!(target: TRACING_TARGET, file, line, "{message}"),
            Severity::Info => tracing::info!(target: TRACING_TARGET, file, line, "{message}"),
            Severity::Debug => tracing::debug!(target: TRACING_TARGET, file, line, "{message}"),
        }
    }
}

/// Installs a `fmt` subscriber for the tracing backend.
///
/// `RUST_LOG` takes precedence; otherwise events at or above the level that
/// corresponds to `threshold` are shown. Returns `false` if a global
/// subscriber was already installed, which is left untouched.
#[cfg(feature = "tracing")]
pub fn init_tracing_backend(threshold: Severity) -> bool {
    use tracing_subscriber::EnvFilter;

    let directive = match TracingBackend::level_for(threshold) {
        Some(level) => level.as_str().to_ascii_lowercase(),
        None => "off".to_owned(),
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
