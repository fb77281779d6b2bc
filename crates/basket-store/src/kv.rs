//! # Key-Value Port
//!
//! The storage boundary of the Cart Store.
//!
//! The persistent engine is an opaque collaborator: all the store needs is
//! scoped get/set over string keys and string values, surviving process
//! restarts. Anything that satisfies [`KvStore`] can back a
//! [`CartStore`](crate::CartStore) - the SQLite slot in production
//! ([`SqliteKvStore`](crate::SqliteKvStore)), the in-memory fake in tests.
//!
//! ## Why a trait object?
//! The store takes `Arc<dyn KvStore>` at construction. Injecting the
//! dependency explicitly replaces the original design's ambient provider
//! lookup: a store without storage is unrepresentable, so there is no
//! "used outside a provider" runtime error left to throw.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Port
// =============================================================================

/// Scoped get/set over string keys and string values.
#[async_trait]
pub trait KvStore: Send + Sync + 'static {
    /// Reads the value stored under `key`, or `None` if the slot is empty.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Overwrites the value stored under `key`. Last write wins.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

// =============================================================================
// In-Memory Implementation
// =============================================================================

/// In-memory [`KvStore`] for tests and previews.
///
/// Values live in a `HashMap` behind a mutex; cloning shares no state, so a
/// "process restart" is simulated by handing the same `Arc` to a fresh
/// [`CartStore`](crate::CartStore).
///
/// ## Fault Injection
/// `fail_writes` makes every `set` return [`StoreError::WriteFailed`],
/// which is how the tests exercise the mirror-write error surface.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: Mutex<bool>,
}

impl MemoryKvStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with one slot.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store
            .entries
            .lock()
            .expect("Kv mutex poisoned")
            .insert(key.into(), value.into());
        store
    }

    /// Toggles write-failure injection.
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().expect("Kv mutex poisoned") = fail;
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self
            .entries
            .lock()
            .expect("Kv mutex poisoned")
            .get(key)
            .cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        if *self.fail_writes.lock().expect("Kv mutex poisoned") {
            return Err(StoreError::WriteFailed("injected failure".to_string()));
        }
        self.entries
            .lock()
            .expect("Kv mutex poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
