//! Leptos hooks running the [`crate::slot::Slot`] load and write steps
//! against signals.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components call [`use_local_storage`] the way they would call `signal()`.
//! The first render always shows the default; an effect runs after mount and
//! whenever the key changes, adopting the stored value if one decodes. Effects
//! never run during server rendering, so SSR output is the default.
//!
//! TRADE-OFFS
//! ==========
//! Browser storage handles are not `Send`, so the store and logging sink live
//! in a thread-local `StoredValue` and the setter stays `Copy`.

#[cfg(test)]
#[path = "hook_test.rs"]
mod hook_test;

use leptos::prelude::*;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::diagnostics::{ConsoleDiagnostics, Diagnostics};
use crate::slot::{load_or_report, persist_or_report};
use crate::storage::{DefaultStore, KeyValueStore};
use crate::update::Update;

/// Write half returned by the storage hooks.
///
/// Every call reads the latest key and value, updates the signal, then
/// mirrors the new value into the store. Calls after the owning component
/// unmounts are ignored.
pub struct StorageSetter<T: 'static, S: 'static, D: 'static = ConsoleDiagnostics> {
    key: Signal<String>,
    value: RwSignal<T>,
    io: StoredValue<(S, D), LocalStorage>,
}

impl<T: 'static, S: 'static, D: 'static> Clone for StorageSetter<T, S, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static, S: 'static, D: 'static> Copy for StorageSetter<T, S, D> {}

impl<T, S, D> StorageSetter<T, S, D>
where
    T: Clone + Serialize + Send + Sync + 'static,
    S: KeyValueStore + 'static,
    D: Diagnostics + 'static,
{
    /// Apply `update` and persist the result.
    pub fn write(&self, update: impl Into<Update<T>>) {
        let Some(next) = self.value.try_with_untracked(|current| update.into().resolve(current)) else {
            return;
        };
        self.value.set(next);

        let key = self.key.get_untracked();
        let value = self.value;
        self.io.try_with_value(|(store, diagnostics)| {
            value.with_untracked(|current| persist_or_report(store, &key, current, diagnostics));
        });
    }

    pub fn set(&self, value: T) {
        self.write(Update::Literal(value));
    }

    pub fn update(&self, f: impl FnOnce(&T) -> T + 'static) {
        self.write(Update::with(f));
    }
}

/// Bind a signal to `key` in `store`, reporting failures to `diagnostics`.
///
/// When the key changes the value resets to `default` unless the new key has
/// a usable entry. The old key's entry is left in the store.
pub fn use_stored_state_with<T, S, D>(
    key: impl Into<Signal<String>>,
    default: T,
    store: S,
    diagnostics: D,
) -> (ReadSignal<T>, StorageSetter<T, S, D>)
where
    T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
    S: KeyValueStore + 'static,
    D: Diagnostics + 'static,
{
    let key = key.into();
    let value = RwSignal::new(default.clone());
    let fallback = StoredValue::new(default);
    let io = StoredValue::new_local((store, diagnostics));

    Effect::new(move |prev: Option<()>| {
        let current_key = key.get();
        let loaded = io.try_with_value(|(store, diagnostics)| load_or_report::<T, _, _>(store, &current_key, diagnostics));
        match loaded.flatten() {
            Some(stored) => value.set(stored),
            // First run already shows the default.
            None if prev.is_some() => value.set(fallback.get_value()),
            None => {}
        }
    });

    (value.read_only(), StorageSetter { key, value, io })
}

/// Bind a signal to `key` in `store`, logging to the console.
pub fn use_stored_state<T, S>(key: impl Into<Signal<String>>, default: T, store: S) -> (ReadSignal<T>, StorageSetter<T, S>)
where
    T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
    S: KeyValueStore + 'static,
{
    use_stored_state_with(key, default, store, ConsoleDiagnostics)
}

/// Bind a signal to `key` in the browser's `localStorage`.
///
/// Outside a hydrated browser build the store is unavailable: the signal
/// keeps working in memory and nothing is persisted.
pub fn use_local_storage<T>(key: impl Into<Signal<String>>, default: T) -> (ReadSignal<T>, StorageSetter<T, DefaultStore>)
where
    T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    use_stored_state(key, default, DefaultStore::local())
}

/// Like [`use_local_storage`], backed by the tab-scoped `sessionStorage`.
pub fn use_session_storage<T>(key: impl Into<Signal<String>>, default: T) -> (ReadSignal<T>, StorageSetter<T, DefaultStore>)
where
    T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    use_stored_state(key, default, DefaultStore::session())
}
