//! crates/logging/src/level_store.rs
//! Write-once holder of the process threshold.

use std::sync::OnceLock;

use crate::config::{LEVEL_ENV, resolve_threshold};
use crate::format::prime_local_offset;
use crate::levels::Severity;

static GLOBAL: LevelStore = LevelStore::new();

/// Holds the minimum severity for a process.
///
/// The value is set exactly once; every later read is lock-free. Emitters
/// built from a [`LogConfig`](crate::LogConfig) do not consult a store, so
/// only the host binding layer depends on the process-wide instance returned
/// by [`LevelStore::global`].
#[derive(Debug, Default)]
pub struct LevelStore {
    threshold: OnceLock<Severity>,
}

impl LevelStore {
    /// Creates an empty store.
    pub const fn new() -> Self {
        Self {
            threshold: OnceLock::new(),
        }
    }

    /// The process-wide store.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Initialises the store from `LUA_LOG_LEVEL`.
    ///
    /// Returns the stored threshold. Only the first call reads the
    /// environment; later calls return the stored value.
    pub fn initialize(&self) -> Severity {
        self.initialize_with_lookup(|| std::env::var(LEVEL_ENV).ok())
    }

    /// Initialises the store from an explicit raw value.
    ///
    /// Absent, empty or invalid values store [`Severity::DEFAULT_THRESHOLD`].
    pub fn initialize_with(&self, value: Option<&str>) -> Severity {
        self.initialize_with_lookup(|| value.map(str::to_owned))
    }

    fn initialize_with_lookup<F>(&self, lookup: F) -> Severity
    where
        F: FnOnce() -> Option<String>,
    {
        *self.threshold.get_or_init(|| {
            prime_local_offset();
            resolve_threshold(lookup().as_deref())
        })
    }

    /// Returns the stored threshold, initialising from the environment first
    /// if nothing did so yet.
    pub fn current(&self) -> Severity {
        match self.threshold.get() {
            Some(threshold) => *threshold,
            None => self.initialize(),
        }
    }

    /// Reports whether a threshold has been stored.
    pub fn is_initialized(&self) -> bool {
        self.threshold.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn first_initialisation_wins() {
        let store = LevelStore::new();
        assert!(!store.is_initialized());
        assert_eq!(store.initialize_with(Some("debug")), Severity::Debug);
        assert_eq!(store.initialize_with(Some("fatal")), Severity::Debug);
        assert_eq!(store.current(), Severity::Debug);
        assert!(store.is_initialized());
    }

    #[test]
    fn missing_value_uses_default() {
        let store = LevelStore::new();
        assert_eq!(store.initialize_with(None), Severity::Warn);
    }

    #[test]
    fn invalid_value_uses_default() {
        let store = LevelStore::new();
        assert_eq!(store.initialize_with(Some("shouty")), Severity::Warn);
        assert_eq!(store.current(), Severity::Warn);
    }

    #[test]
    fn numeric_values_are_accepted() {
        let store = LevelStore::new();
        assert_eq!(store.initialize_with(Some("0")), Severity::None);
    }

    #[test]
    fn lookup_runs_only_once() {
        let store = LevelStore::new();
        let calls = std::cell::Cell::new(0);
        let lookup = || {
            calls.set(calls.get() + 1);
            Some("info".to_owned())
        };
        assert_eq!(store.initialize_with_lookup(lookup), Severity::Info);
        assert_eq!(store.initialize_with_lookup(lookup), Severity::Info);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn concurrent_readers_see_one_value() {
        let store = Arc::new(LevelStore::new());
        store.initialize_with(Some("error"));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.current())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Severity::Error);
        }
    }
}
