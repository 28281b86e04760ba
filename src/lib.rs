//! # stored-signal
//!
//! One piece of state kept in sync with the browser's key-value storage.
//!
//! [`Slot`] is the framework-independent cell: construct it with a key, a
//! default and a [`KeyValueStore`], call [`Slot::initialize`] once, then
//! [`Slot::write`]. [`use_local_storage`] wraps the same behavior as a Leptos
//! hook returning `(ReadSignal<T>, StorageSetter<T, _>)`.
//!
//! Storage failures (quota, disabled storage, malformed stored text, values
//! JSON cannot encode) never reach the caller. They are logged through
//! [`Diagnostics`] and the in-memory value stays authoritative.

pub mod codec;
pub mod diagnostics;
pub mod hook;
pub mod slot;
pub mod storage;
pub mod update;

pub use codec::SlotError;
pub use diagnostics::{ConsoleDiagnostics, Diagnostics, Level, RecordingDiagnostics};
pub use hook::{StorageSetter, use_local_storage, use_session_storage, use_stored_state, use_stored_state_with};
pub use slot::{Slot, SlotPhase};
#[cfg(feature = "hydrate")]
pub use storage::BrowserStore;
pub use storage::{DefaultStore, KeyValueStore, MemoryStore, StorageError, StorageKind, UnavailableStore};
pub use update::Update;
