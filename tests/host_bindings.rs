//! Integration tests for the host binding layer.
//!
//! Most tests build [`Bindings`] from an explicit configuration that writes to
//! a temporary file, so results do not depend on the environment of the test
//! process. Only the structural checks touch the process-wide module.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use logging::{BackendKind, Destination, ParsedLine};
use lualog::{Bindings, FUNCTIONS, HostValue, LogConfig, MODULE_NAME, Severity, open_module};

fn args(file: &str, line: i64, message: &str) -> Vec<HostValue> {
    vec![file.into(), line.into(), message.into()]
}

fn file_bindings(dir: &Path, threshold: Severity) -> (Bindings, PathBuf) {
    let path = dir.join("host.log");
    let config = LogConfig {
        threshold,
        destination: Destination::File(path.clone()),
        ..LogConfig::default()
    };
    (Bindings::from_config(&config), path)
}

fn written_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("read log")
        .lines()
        .map(str::to_owned)
        .collect()
}

// ============================================================================
// Module Table Tests
// ============================================================================

/// Verifies the loader name.
#[test]
fn module_name_matches_loader_path() {
    assert_eq!(MODULE_NAME, "lib.lualog");
}

/// Verifies `open_module` returns the five exported functions in severity order.
#[test]
fn open_module_exposes_five_functions() {
    let table = open_module();
    let names: Vec<_> = table.iter().map(|(name, _)| *name).collect();
    assert_eq!(
        names,
        ["l_log_fatal", "l_log_error", "l_log_warn", "l_log_info", "l_log_debug"]
    );
    assert_eq!(table.as_ptr(), FUNCTIONS.as_ptr());
}

/// Verifies every exported function answers with at most one value.
#[test]
fn exported_functions_return_at_most_one_value() {
    for (name, function) in open_module() {
        let returned = function(&args("scripts/table.lua", 3, name));
        assert!(returned.len() <= 1, "{name} returned {returned:?}");
        assert!(returned.iter().all(|value| matches!(value, HostValue::Boolean(_))));
    }
}

// ============================================================================
// Built-in Mode Tests
// ============================================================================

/// Verifies the warn threshold through host calls: error is written, debug is not.
#[test]
fn warn_threshold_through_host_calls() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (bindings, path) = file_bindings(dir.path(), Severity::Warn);

    assert_eq!(
        bindings.call(Severity::Error, &args("a/b.lua", 10, "x")),
        [HostValue::Boolean(true)]
    );
    assert_eq!(
        bindings.call(Severity::Debug, &args("a/b.lua", 11, "y")),
        [HostValue::Boolean(false)]
    );

    let lines = written_lines(&path);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("|E|b.lua:10|x"));
}

/// Verifies the debug threshold answers true for all five levels and writes them in order.
#[test]
fn debug_threshold_through_host_calls() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (bindings, path) = file_bindings(dir.path(), Severity::Debug);

    for severity in Severity::CALLABLE {
        assert_eq!(
            bindings.call(severity, &args("m.lua", 1, "m")),
            [HostValue::Boolean(true)]
        );
    }

    let tags: String = written_lines(&path)
        .iter()
        .map(|line| ParsedLine::parse(line).expect("well formed").severity.tag())
        .collect();
    assert_eq!(tags, "FEWID");
}

/// Verifies the none threshold answers false for every level and writes nothing.
#[test]
fn none_threshold_through_host_calls() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (bindings, path) = file_bindings(dir.path(), Severity::None);

    for severity in Severity::CALLABLE {
        assert_eq!(
            bindings.call(severity, &args("m.lua", 1, "m")),
            [HostValue::Boolean(false)]
        );
    }
    assert!(written_lines(&path).is_empty());
}

/// Verifies malformed arguments are coerced rather than rejected.
#[test]
fn malformed_arguments_are_coerced() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (bindings, path) = file_bindings(dir.path(), Severity::Warn);

    let odd = [
        vec![],
        vec![HostValue::Boolean(true), HostValue::from("NaN"), HostValue::Number(0.5)],
        vec![HostValue::Integer(9), HostValue::Number(-3.7), HostValue::Nil],
    ];
    for call in &odd {
        assert_eq!(bindings.call(Severity::Fatal, call), [HostValue::Boolean(true)]);
    }

    let parsed: Vec<_> = written_lines(&path)
        .into_iter()
        .map(|line| {
            let parsed = ParsedLine::parse(&line).expect("well formed");
            (parsed.file.to_owned(), parsed.line, parsed.message.to_owned())
        })
        .collect();
    assert_eq!(
        parsed,
        [
            (String::new(), 0, "nil".to_owned()),
            (String::new(), 0, "0.5".to_owned()),
            ("9".to_owned(), -3, "nil".to_owned()),
        ]
    );
}

/// Verifies concurrent host calls produce one intact line each.
#[test]
fn concurrent_host_calls_write_intact_lines() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (bindings, path) = file_bindings(dir.path(), Severity::Error);

    thread::scope(|scope| {
        for worker in 0..4 {
            let bindings = &bindings;
            scope.spawn(move || {
                for call in 0..25 {
                    let returned =
                        bindings.call(Severity::Error, &args("t.lua", call, &format!("w{worker}")));
                    assert_eq!(returned, [HostValue::Boolean(true)]);
                }
            });
        }
    });

    let lines = written_lines(&path);
    assert_eq!(lines.len(), 100);
    assert!(lines.iter().all(|line| ParsedLine::parse(line).is_some()));
}

// ============================================================================
// External Mode Tests
// ============================================================================

/// Verifies external mode pushes no values back to the host.
#[test]
fn external_backend_returns_nothing() {
    let config = LogConfig {
        backend: BackendKind::Tracing,
        ..LogConfig::default()
    };
    let bindings = Bindings::from_config(&config);

    assert!(bindings.is_external());
    for severity in Severity::CALLABLE {
        assert!(bindings.call(severity, &args("a.lua", 1, "m")).is_empty());
    }
}
