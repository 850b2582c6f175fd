//! src/bindings.rs
//! The five exported log functions and the process-wide emitter behind them.

use std::sync::OnceLock;

use logging::{Emitter, LevelStore, LogConfig, LogSink, Severity};

use crate::value::HostValue;

/// Name under which the script runtime loads the module.
pub const MODULE_NAME: &str = "lib.lualog";

/// Signature shared by every exported function.
///
/// Arguments are `(file, line, message)`; missing ones read as nil. The
/// returned values are pushed back to the host.
pub type HostFn = fn(&[HostValue]) -> Vec<HostValue>;

/// The exported function table, in severity order.
pub static FUNCTIONS: [(&str, HostFn); 5] = [
    ("l_log_fatal", l_log_fatal),
    ("l_log_error", l_log_error),
    ("l_log_warn", l_log_warn),
    ("l_log_info", l_log_info),
    ("l_log_debug", l_log_debug),
];

static MODULE: OnceLock<Bindings> = OnceLock::new();
static NIL: HostValue = HostValue::Nil;

/// Loads the module.
///
/// In built-in mode this initialises [`LevelStore::global`] from the
/// environment before any log call runs. Returns the exported table.
pub fn open_module() -> &'static [(&'static str, HostFn)] {
    let bindings = bindings();
    if !bindings.is_external() {
        LevelStore::global().initialize();
    }
    &FUNCTIONS
}

/// Logs a fatal message through the process-wide emitter.
pub fn l_log_fatal(args: &[HostValue]) -> Vec<HostValue> {
    bindings().call(Severity::Fatal, args)
}

/// Logs an error message through the process-wide emitter.
pub fn l_log_error(args: &[HostValue]) -> Vec<HostValue> {
    bindings().call(Severity::Error, args)
}

/// Logs a warning through the process-wide emitter.
pub fn l_log_warn(args: &[HostValue]) -> Vec<HostValue> {
    bindings().call(Severity::Warn, args)
}

/// Logs an informational message through the process-wide emitter.
pub fn l_log_info(args: &[HostValue]) -> Vec<HostValue> {
    bindings().call(Severity::Info, args)
}

/// Logs a debug message through the process-wide emitter.
pub fn l_log_debug(args: &[HostValue]) -> Vec<HostValue> {
    bindings().call(Severity::Debug, args)
}

/// Logs at [`Severity::Fatal`] with typed arguments, skipping host coercion.
///
/// Returns whether a line was written; always `false` in external mode.
pub fn log_fatal(file: &str, line: i64, message: &str) -> bool {
    bindings().emitter().fatal(file, line, message)
}

/// Logs at [`Severity::Error`] with typed arguments.
pub fn log_error(file: &str, line: i64, message: &str) -> bool {
    bindings().emitter().error(file, line, message)
}

/// Logs at [`Severity::Warn`] with typed arguments.
pub fn log_warn(file: &str, line: i64, message: &str) -> bool {
    bindings().emitter().warn(file, line, message)
}

/// Logs at [`Severity::Info`] with typed arguments.
pub fn log_info(file: &str, line: i64, message: &str) -> bool {
    bindings().emitter().info(file, line, message)
}

/// Logs at [`Severity::Debug`] with typed arguments.
pub fn log_debug(file: &str, line: i64, message: &str) -> bool {
    bindings().emitter().debug(file, line, message)
}

/// Returns the process-wide bindings, building them on first use.
pub fn bindings() -> &'static Bindings {
    MODULE.get_or_init(|| Bindings::from_config(&global_config()))
}

// Built-in mode takes its threshold from the level store so the binding
// layer and `LevelStore::global` agree.
fn global_config() -> LogConfig {
    let mut config = LogConfig::from_env();
    if !config.backend.is_external() {
        config.threshold = LevelStore::global().current();
    }
    config
}

/// An emitter plus the knowledge of how to answer the host.
#[derive(Debug)]
pub struct Bindings {
    emitter: Emitter,
    external: bool,
}

impl Bindings {
    /// Wraps an emitter. `external` selects the return convention: external
    /// backends push no values back to the host.
    pub fn new(emitter: Emitter, external: bool) -> Self {
        Self { emitter, external }
    }

    /// Builds bindings for the sink `config` describes.
    pub fn from_config(config: &LogConfig) -> Self {
        tracing::debug!(
            backend = %config.backend,
            threshold = %config.threshold,
            "opening {MODULE_NAME}"
        );
        Self::new(
            Emitter::new(logging_sink::sink_for(config)),
            config.backend.is_external(),
        )
    }

    /// Builds bindings around an arbitrary sink.
    pub fn with_sink<S>(sink: S, external: bool) -> Self
    where
        S: LogSink + 'static,
    {
        Self::new(Emitter::boxed(sink), external)
    }

    /// Reports whether calls are forwarded to an external backend.
    pub fn is_external(&self) -> bool {
        self.external
    }

    /// The underlying emitter.
    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    /// Coerces `args` and logs them at `severity`.
    ///
    /// Built-in mode answers with one boolean telling whether a line was
    /// written. External mode answers with nothing.
    pub fn call(&self, severity: Severity, args: &[HostValue]) -> Vec<HostValue> {
        let arg = |index: usize| args.get(index).unwrap_or(&NIL);
        let file = arg(0).as_file();
        let message = arg(2).as_message();
        let emitted = self
            .emitter
            .log(severity, &file, arg(1).as_line(), &message);

        if self.external {
            Vec::new()
        } else {
            vec![HostValue::Boolean(emitted)]
        }
    }
}
