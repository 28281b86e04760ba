use super::*;

// =============================================================
// MemoryStore
// =============================================================

#[test]
fn memory_store_missing_key_is_none() {
    let store = MemoryStore::new();
    assert_eq!(store.get("absent"), Ok(None));
    assert!(store.is_empty());
}

#[test]
fn memory_store_set_then_get() {
    let store = MemoryStore::new();
    store.set("theme", "\"dark\"").unwrap();
    assert_eq!(store.get("theme"), Ok(Some("\"dark\"".to_owned())));
    assert_eq!(store.len(), 1);
}

#[test]
fn memory_store_clones_share_entries() {
    let store = MemoryStore::new();
    let other = store.clone();
    store.set("k", "1").unwrap();
    assert_eq!(other.raw("k").as_deref(), Some("1"));
}

#[test]
fn memory_store_empty_string_is_present() {
    let store = MemoryStore::new();
    store.set("k", "").unwrap();
    assert_eq!(store.get("k"), Ok(Some(String::new())));
}

#[test]
fn memory_store_quota_rejects_oversized_write() {
    let store = MemoryStore::with_quota(8);
    let err = store.set("key", "toolong").unwrap_err();
    assert_eq!(err, StorageError::QuotaExceeded { key: "key".to_owned(), needed: 10, limit: 8 });
    assert_eq!(store.raw("key"), None);
}

#[test]
fn memory_store_quota_counts_replacement_not_old_value() {
    let store = MemoryStore::with_quota(6);
    store.set("k", "12345").unwrap();
    // Replacing the same key only needs room for the new value.
    store.set("k", "abcde").unwrap();
    assert_eq!(store.raw("k").as_deref(), Some("abcde"));
}

#[test]
fn memory_store_quota_counts_other_keys() {
    let store = MemoryStore::with_quota(6);
    store.set("a", "12").unwrap();
    assert!(matches!(store.set("b", "123"), Err(StorageError::QuotaExceeded { .. })));
}

#[test]
fn memory_store_is_available() {
    assert!(MemoryStore::new().is_available());
}

// =============================================================
// UnavailableStore
// =============================================================

#[test]
fn unavailable_store_raises_on_read_and_write() {
    let store = UnavailableStore;
    assert_eq!(store.get("k"), Err(StorageError::Unavailable));
    assert_eq!(store.set("k", "v"), Err(StorageError::Unavailable));
    assert!(!store.is_available());
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn default_store_is_unavailable_without_hydrate() {
    let store: DefaultStore = DefaultStore::local();
    assert!(!store.is_available());
}

// =============================================================
// Rc forwarding
// =============================================================

#[test]
fn rc_store_forwards_to_inner() {
    let store = Rc::new(MemoryStore::new());
    KeyValueStore::set(&store, "k", "v").unwrap();
    assert_eq!(KeyValueStore::get(&store, "k"), Ok(Some("v".to_owned())));
    assert!(KeyValueStore::is_available(&store));
}

#[test]
fn storage_error_messages_name_the_failure() {
    assert_eq!(StorageError::Unavailable.to_string(), "storage is not available in this context");
    assert_eq!(StorageError::Write("denied".into()).to_string(), "storage write failed: denied");
}

// =============================================================
// Browser area lookup
// =============================================================

#[test]
fn resolve_area_passes_through_present_area() {
    assert_eq!(resolve_area::<u8, &str>(Ok(Some(7)), StorageError::Write), Ok(7));
}

#[test]
fn resolve_area_raising_lookup_fails_the_write() {
    let err = resolve_area::<u8, &str>(Err("SecurityError"), StorageError::Write).unwrap_err();
    assert_eq!(err, StorageError::Write("\"SecurityError\"".to_owned()));
}

#[test]
fn resolve_area_missing_area_fails_the_read() {
    let err = resolve_area::<u8, &str>(Ok(None), StorageError::Read).unwrap_err();
    assert!(matches!(err, StorageError::Read(_)));
    assert_ne!(err, StorageError::Unavailable);
}
