//! Framework-independent synchronized state cell.
//!
//! DESIGN
//! ======
//! A [`Slot`] owns one value mirrored under one key. Loading is an explicit
//! [`Slot::initialize`] call made by whoever owns the slot's lifecycle, so the
//! cell does not depend on any render cycle. Every store or codec failure is
//! reported through [`Diagnostics`] and swallowed; memory always wins.

#[cfg(test)]
#[path = "slot_test.rs"]
mod slot_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::codec::{load_value, persist_value};
use crate::diagnostics::{ConsoleDiagnostics, Diagnostics};
use crate::storage::KeyValueStore;
use crate::update::Update;

/// Decode the entry for `key`. Failures are reported and read as absent.
pub(crate) fn load_or_report<T, S, D>(store: &S, key: &str, diagnostics: &D) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore,
    D: Diagnostics,
{
    load_value(store, key).unwrap_or_else(|e| {
        diagnostics.report(&e);
        None
    })
}

/// Mirror `value` under `key`. Failures are reported; the caller keeps its value.
pub(crate) fn persist_or_report<T, S, D>(store: &S, key: &str, value: &T, diagnostics: &D)
where
    T: Serialize,
    S: KeyValueStore,
    D: Diagnostics,
{
    if let Err(e) = persist_value(store, key, value) {
        diagnostics.report(&e);
    }
}

/// Where a slot is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SlotPhase {
    /// Constructed or re-keyed; holds the default and has not consulted the store.
    #[default]
    Uninitialized,
    /// Holds the loaded value, or the default when nothing usable was stored.
    Ready,
    /// Written at least once since initialization.
    Updated,
}

/// One value mirrored into a [`KeyValueStore`] under `key`.
pub struct Slot<T, S, D = ConsoleDiagnostics> {
    key: String,
    default: T,
    value: T,
    store: S,
    diagnostics: D,
    phase: SlotPhase,
}

impl<T, S> Slot<T, S>
where
    T: Clone + Serialize + DeserializeOwned,
    S: KeyValueStore,
{
    /// Create an uninitialized slot holding `default`.
    pub fn new(key: impl Into<String>, default: T, store: S) -> Self {
        Self {
            key: key.into(),
            value: default.clone(),
            default,
            store,
            diagnostics: ConsoleDiagnostics,
            phase: SlotPhase::Uninitialized,
        }
    }
}

impl<T, S, D> Slot<T, S, D>
where
    T: Clone + Serialize + DeserializeOwned,
    S: KeyValueStore,
    D: Diagnostics,
{
    /// Swap the logging sink.
    pub fn with_diagnostics<E: Diagnostics>(self, diagnostics: E) -> Slot<T, S, E> {
        Slot {
            key: self.key,
            default: self.default,
            value: self.value,
            store: self.store,
            diagnostics,
            phase: self.phase,
        }
    }

    /// Load the stored value for the current key, if any.
    ///
    /// Absent keys and load failures leave the default in place; failures are
    /// logged as warnings.
    pub fn initialize(&mut self) {
        if let Some(stored) = load_or_report(&self.store, &self.key, &self.diagnostics) {
            self.value = stored;
        }
        self.phase = SlotPhase::Ready;
    }

    /// Build and initialize in one step.
    pub fn open(key: impl Into<String>, default: T, store: S, diagnostics: D) -> Self {
        let mut slot = Slot::<T, S>::new(key, default, store).with_diagnostics(diagnostics);
        slot.initialize();
        slot
    }

    /// Point the slot at a different key and re-run initialization.
    ///
    /// The value starts from the default again. The previous key's stored
    /// entry is left as is. Re-keying to the same key is a no-op.
    pub fn set_key(&mut self, key: impl Into<String>) {
        let key = key.into();
        if key == self.key && self.phase != SlotPhase::Uninitialized {
            return;
        }
        self.key = key;
        self.value = self.default.clone();
        self.phase = SlotPhase::Uninitialized;
        self.initialize();
    }

    /// Current in-memory value.
    pub fn read(&self) -> &T {
        &self.value
    }

    /// Clone of the current in-memory value.
    pub fn get(&self) -> T {
        self.value.clone()
    }

    /// Apply `update`, then mirror the result to the store.
    ///
    /// The in-memory value always changes. Encode and store failures are
    /// logged as errors and the store keeps its previous text.
    pub fn write(&mut self, update: impl Into<Update<T>>) {
        self.value = update.into().resolve(&self.value);
        self.phase = SlotPhase::Updated;
        persist_or_report(&self.store, &self.key, &self.value, &self.diagnostics);
    }

    /// Replace the value.
    pub fn set(&mut self, value: T) {
        self.write(Update::Literal(value));
    }

    /// Replace the value with `f(current)`.
    pub fn update(&mut self, f: impl FnOnce(&T) -> T + 'static) {
        self.write(Update::with(f));
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn phase(&self) -> SlotPhase {
        self.phase
    }
}
