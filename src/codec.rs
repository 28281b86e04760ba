//! JSON encoding of slot values and the load/persist steps built on it.
//!
//! Both helpers return `Result`; turning failures into log lines is left to
//! the slot and hook boundaries.

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::storage::{KeyValueStore, StorageError};

/// Failure while loading or persisting a slot value.
#[derive(Debug, thiserror::Error)]
pub enum SlotError {
    /// Stored text exists but does not decode into the slot's type.
    #[error("failed to decode stored value for {key:?}: {source}")]
    Decode { key: String, source: serde_json::Error },
    /// The new value cannot be represented as JSON.
    #[error("failed to encode value for {key:?}: {source}")]
    Encode { key: String, source: serde_json::Error },
    /// The store is unreachable or raised while reading.
    #[error("failed to read {key:?}: {source}")]
    Read { key: String, source: StorageError },
    /// The store is unreachable, full, or raised while writing.
    #[error("failed to write {key:?}: {source}")]
    Write { key: String, source: StorageError },
}

impl SlotError {
    /// Load failures are reported as warnings, write failures as errors.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::Read { .. })
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Decode { key, .. } | Self::Encode { key, .. } | Self::Read { key, .. } | Self::Write { key, .. } => key,
        }
    }
}

/// Encode `value` as JSON text.
///
/// # Errors
///
/// Returns the serializer error for values JSON cannot represent.
pub fn encode<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Decode JSON text produced by [`encode`].
///
/// # Errors
///
/// Returns the parser error for malformed text or a shape mismatch.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Read and decode the value stored under `key`.
///
/// `Ok(None)` means the key was never written. Any stored text, including an
/// encoded empty string or `null`, counts as present.
///
/// # Errors
///
/// Returns [`SlotError::Read`] or [`SlotError::Decode`].
pub fn load_value<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Result<Option<T>, SlotError> {
    let Some(raw) = store.get(key).map_err(|source| SlotError::Read { key: key.to_owned(), source })? else {
        return Ok(None);
    };
    decode(&raw)
        .map(Some)
        .map_err(|source| SlotError::Decode { key: key.to_owned(), source })
}

/// Encode `value` and write it under `key`.
///
/// Returns `Ok(false)` without touching the store when it reports itself
/// unavailable.
///
/// # Errors
///
/// Returns [`SlotError::Encode`] or [`SlotError::Write`].
pub fn persist_value<T: Serialize>(store: &impl KeyValueStore, key: &str, value: &T) -> Result<bool, SlotError> {
    if !store.is_available() {
        return Ok(false);
    }
    let raw = encode(value).map_err(|source| SlotError::Encode { key: key.to_owned(), source })?;
    store
        .set(key, &raw)
        .map_err(|source| SlotError::Write { key: key.to_owned(), source })?;
    Ok(true)
}
