#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! src/lib.rs
//!
//! # Overview
//!
//! `lualog` is the host-facing side of the logging bridge. It exposes five
//! functions, `l_log_fatal` through `l_log_debug`, under the module name
//! [`MODULE_NAME`]. An embedded script runtime calls them with loosely typed
//! `(file, line, message)` arguments.
//!
//! # Design
//!
//! The arguments arrive as [`HostValue`]s and are coerced at this boundary
//! only. Everything below works with typed values: the calls go to a
//! process-wide [`Emitter`](logging::Emitter) built lazily from
//! [`LogConfig::from_env`](logging::LogConfig::from_env) and
//! [`logging_sink::sink_for`]. Embedders that want their own configuration
//! build a [`Bindings`] directly.
//!
//! # Invariants
//!
//! - Log functions never fail and never panic on malformed arguments.
//! - In built-in mode each call returns exactly one boolean telling whether a
//!   line was written. In external mode calls return no values.
//!
//! # Examples
//!
//! ```
//! use lualog::{Bindings, HostValue, LogConfig, Severity};
//!
//! let bindings = Bindings::from_config(&LogConfig::with_threshold(Severity::None));
//! let returned = bindings.call(Severity::Error, &["a/b.lua".into(), 10_i64.into(), "x".into()]);
//! assert_eq!(returned, [HostValue::Boolean(false)]);
//! ```

mod bindings;
mod value;

pub use bindings::{
    Bindings, FUNCTIONS, HostFn, MODULE_NAME, bindings, l_log_debug, l_log_error, l_log_fatal,
    l_log_info, l_log_warn, log_debug, log_error, log_fatal, log_info, log_warn, open_module,
};
pub use value::HostValue;

pub use logging::{LogConfig, Severity};
