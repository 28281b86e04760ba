//! Logging side channel for recovered storage failures.
//!
//! Load failures go out at warning level and write failures at error level.
//! Nothing here can fail.

use std::cell::RefCell;
use std::rc::Rc;

use crate::codec::SlotError;

/// Sink for recoverable failures.
pub trait Diagnostics {
    fn warn(&self, message: &str);
    fn error(&self, message: &str);

    /// Route `err` to the level matching its kind.
    fn report(&self, err: &SlotError) {
        let message = err.to_string();
        if err.is_load_failure() {
            self.warn(&message);
        } else {
            self.error(&message);
        }
    }
}

/// Writes to the browser console in hydrated builds and to stderr natively.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleDiagnostics;

impl Diagnostics for ConsoleDiagnostics {
    fn warn(&self, message: &str) {
        leptos::logging::warn!("{message}");
    }

    fn error(&self, message: &str) {
        leptos::logging::error!("{message}");
    }
}

/// Severity of a recorded entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Warn,
    Error,
}

/// Keeps every message in memory. Clones share one log.
#[derive(Clone, Debug, Default)]
pub struct RecordingDiagnostics {
    entries: Rc<RefCell<Vec<(Level, String)>>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries.borrow().clone()
    }

    pub fn count(&self, level: Level) -> usize {
        self.entries.borrow().iter().filter(|(l, _)| *l == level).count()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn warn(&self, message: &str) {
        self.entries.borrow_mut().push((Level::Warn, message.to_owned()));
    }

    fn error(&self, message: &str) {
        self.entries.borrow_mut().push((Level::Error, message.to_owned()));
    }
}
