//! crates/logging-sink/src/syslog.rs
//! Syslog backend for hosts that route script logs to the system logger.
//!
//! Uses libc `openlog`/`syslog`/`closelog` directly. Entries carry the
//! stripped source location and the message as `file:line|message`, and the
//! severity maps onto the matching syslog(3) priority.
//!
//! syslog(3) keeps one connection per process. The ident is fixed by the
//! first [`SyslogBackend::open`]; the connection is closed when the last open
//! backend is dropped.

use std::ffi::{CStr, CString};
use std::sync::{Mutex, OnceLock, PoisonError};

use logging::{Severity, SyslogFacility};

use crate::external::ExternalBackend;

static IDENT: OnceLock<CString> = OnceLock::new();
static OPEN_BACKENDS: Mutex<usize> = Mutex::new(0);

/// syslog(3) facility code for `facility`.
pub const fn facility_code(facility: SyslogFacility) -> libc::c_int {
    match facility {
        SyslogFacility::User => libc::LOG_USER,
        SyslogFacility::Daemon => libc::LOG_DAEMON,
        SyslogFacility::Local0 => libc::LOG_LOCAL0,
        SyslogFacility::Local1 => libc::LOG_LOCAL1,
        SyslogFacility::Local2 => libc::LOG_LOCAL2,
        SyslogFacility::Local3 => libc::LOG_LOCAL3,
        SyslogFacility::Local4 => libc::LOG_LOCAL4,
        SyslogFacility::Local5 => libc::LOG_LOCAL5,
        SyslogFacility::Local6 => libc::LOG_LOCAL6,
        SyslogFacility::Local7 => libc::LOG_LOCAL7,
    }
}

/// Syslog priority for a call severity; `None` for [`Severity::None`].
pub const fn priority_for(severity: Severity) -> Option<libc::c_int> {
    match severity {
        Severity::None => None,
        Severity::Fatal => Some(libc::LOG_CRIT),
        Severity::Error => Some(libc::LOG_ERR),
        Severity::Warn => Some(libc::LOG_WARNING),
        Severity::Info => Some(libc::LOG_INFO),
        Severity::Debug => Some(libc::LOG_DEBUG),
    }
}

/// Renders the syslog payload for one call.
pub fn syslog_payload(file: &str, line: i64, message: &str) -> String {
    let message = message.strip_suffix('\n').unwrap_or(message);
    format!("{file}:{line}|{message}")
}

/// External backend writing to syslog(3).
///
/// Several backends may exist at once but they share the process-wide
/// connection: the ident and facility of the first `open` win, and
/// `closelog` runs only when the last backend is dropped.
#[derive(Debug)]
pub struct SyslogBackend {
    facility: SyslogFacility,
}

impl SyslogBackend {
    /// Opens the syslog connection with `tag` as ident.
    ///
    /// A tag containing a NUL byte is replaced by the default tag. A tag that
    /// differs from the one already in use is ignored with a warning.
    #[allow(unsafe_code)]
    pub fn open(tag: &str, facility: SyslogFacility) -> Self {
        let ident = IDENT.get_or_init(|| {
            CString::new(tag).unwrap_or_else(|_| c_string_lossy(logging::DEFAULT_SYSLOG_TAG))
        });
        if ident.as_bytes() != tag.as_bytes() {
            tracing::warn!(
                requested = tag,
                active = %ident.to_string_lossy(),
                "syslog ident is fixed per process, keeping the first one"
            );
        }

        let mut open = OPEN_BACKENDS
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if *open == 0 {
            // SAFETY: the ident pointer stays valid for the process lifetime
            // because it lives in a static. openlog has no other preconditions.
            unsafe {
                libc::openlog(ident.as_ptr(), libc::LOG_PID, facility_code(facility));
            }
        }
        *open += 1;

        Self { facility }
    }

    /// Facility requested when this backend was opened.
    pub const fn facility(&self) -> SyslogFacility {
        self.facility
    }

    /// Ident the process-wide connection uses.
    pub fn ident() -> Option<&'static CStr> {
        IDENT.get().map(CString::as_c_str)
    }
}

impl ExternalBackend for SyslogBackend {
    #[allow(unsafe_code)]
    fn log(&self, severity: Severity, file: &str, line: i64, message: &str) {
        let Some(priority) = priority_for(severity) else {
            return;
        };
        let payload = c_string_lossy(&syslog_payload(file, line, message));

        // SAFETY: both pointers are valid NUL-terminated strings for the
        // duration of the call and `%s` consumes exactly one argument, so the
        // message is never interpreted as a format string.
        unsafe {
            libc::syslog(
                priority | facility_code(self.facility),
                c"%s".as_ptr(),
                payload.as_ptr(),
            );
        }
    }
}

impl Drop for SyslogBackend {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        let mut open = OPEN_BACKENDS
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *open = open.saturating_sub(1);
        if *open == 0 {
            // SAFETY: closelog has no preconditions.
            unsafe {
                libc::closelog();
            }
        }
    }
}

fn c_string_lossy(text: &str) -> CString {
    CString::new(text.replace('\0', "")).unwrap_or_default()
}
