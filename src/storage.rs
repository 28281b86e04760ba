//! Synchronous string key-value stores that a slot can mirror into.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser's `localStorage` is a global that only exists in hydrated
//! builds. Slots talk to the [`KeyValueStore`] trait instead so the same code
//! runs under SSR (where no store exists) and in native tests (against
//! [`MemoryStore`]).

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Error raised by a [`KeyValueStore`] operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The execution context does not expose the store at all.
    #[error("storage is not available in this context")]
    Unavailable,
    /// The store raised while reading.
    #[error("storage read failed: {0}")]
    Read(String),
    /// The store raised while writing.
    #[error("storage write failed: {0}")]
    Write(String),
    /// Writing would exceed the store's capacity.
    #[error("storage quota exceeded writing {key:?}: {needed} bytes needed, limit {limit}")]
    QuotaExceeded { key: String, needed: usize, limit: usize },
}

/// A synchronous, string-keyed, string-valued store.
pub trait KeyValueStore {
    /// Read the raw text stored under `key`, `None` when the key was never set.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the store cannot be reached,
    /// or [`StorageError::Read`] when the underlying medium raises.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::QuotaExceeded`] or [`StorageError::Write`] when
    /// the medium rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Liveness probe run before every write.
    fn is_available(&self) -> bool {
        true
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

/// Which browser storage area a [`BrowserStore`] addresses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StorageKind {
    /// `window.localStorage`, survives browser restarts.
    #[default]
    Local,
    /// `window.sessionStorage`, scoped to the tab.
    Session,
}

// =============================================================
// In-memory store
// =============================================================

#[derive(Debug, Default)]
struct MemoryInner {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryInner {
    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

/// Process-local store backed by a shared `HashMap`.
///
/// Clones share the same entries, so a test can hand one clone to a slot and
/// inspect the other.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes pushing total key + value bytes past `limit`.
    pub fn with_quota(limit: usize) -> Self {
        let store = Self::default();
        store.inner.borrow_mut().quota = Some(limit);
        store
    }

    /// Seed `key` with raw text, bypassing quota checks.
    pub fn insert_raw(&self, key: &str, raw: &str) {
        self.inner.borrow_mut().entries.insert(key.to_owned(), raw.to_owned());
    }

    /// Raw text currently stored under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().entries.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.borrow_mut();
        if let Some(limit) = inner.quota {
            let needed = inner.used_bytes_without(key) + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded { key: key.to_owned(), needed, limit });
            }
        }
        inner.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

// =============================================================
// Unavailable store
// =============================================================

/// Stand-in for contexts without browser storage (SSR, native builds).
///
/// Reads raise [`StorageError::Unavailable`]; writes are never attempted
/// because [`KeyValueStore::is_available`] reports `false`.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableStore;

impl UnavailableStore {
    /// Mirrors [`BrowserStore::local`] so callers can name [`DefaultStore`]
    /// without cfg guards.
    pub fn local() -> Self {
        Self
    }

    pub fn session() -> Self {
        Self
    }
}

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn is_available(&self) -> bool {
        false
    }
}

// =============================================================
// Browser store
// =============================================================

/// `window.localStorage` / `window.sessionStorage`, resolved on every call.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore {
    kind: StorageKind,
}

#[cfg(feature = "hydrate")]
impl BrowserStore {
    pub fn new(kind: StorageKind) -> Self {
        Self { kind }
    }

    pub fn local() -> Self {
        Self::new(StorageKind::Local)
    }

    pub fn session() -> Self {
        Self::new(StorageKind::Session)
    }

    /// Look up the storage area on the current window.
    ///
    /// A missing window is [`StorageError::Unavailable`]; an area that raises
    /// or is absent fails the operation in progress via `fail`.
    fn area(&self, fail: fn(String) -> StorageError) -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        let lookup = match self.kind {
            StorageKind::Local => window.local_storage(),
            StorageKind::Session => window.session_storage(),
        };
        resolve_area(lookup, fail)
    }
}

#[cfg(feature = "hydrate")]
impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.area(StorageError::Read)?
            .get_item(key)
            .map_err(|e| StorageError::Read(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.area(StorageError::Write)?
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{e:?}")))
    }

    /// Only the window is probed, so disabled storage surfaces as a write error.
    fn is_available(&self) -> bool {
        web_sys::window().is_some()
    }
}

/// Classify a `Window::local_storage` style lookup.
///
/// Browsers raise (`SecurityError`) or return no area when storage is
/// disabled by policy; both fail the current operation through `fail`.
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
fn resolve_area<A, E: std::fmt::Debug>(lookup: Result<Option<A>, E>, fail: fn(String) -> StorageError) -> Result<A, StorageError> {
    match lookup {
        Ok(Some(area)) => Ok(area),
        Ok(None) => Err(fail("storage area is disabled".to_owned())),
        Err(e) => Err(fail(format!("{e:?}"))),
    }
}

/// Store used by [`crate::use_local_storage`]: the browser in hydrated builds,
/// [`UnavailableStore`] everywhere else.
#[cfg(feature = "hydrate")]
pub type DefaultStore = BrowserStore;

/// Store used by [`crate::use_local_storage`]: the browser in hydrated builds,
/// [`UnavailableStore`] everywhere else.
#[cfg(not(feature = "hydrate"))]
pub type DefaultStore = UnavailableStore;
