//! In-memory storage for tests and ephemeral sessions.
//!
//! Clones share the same underlying map, so a test can keep one handle, hand a
//! clone to a store, drop the store and open a second store over another clone
//! to simulate a process restart.  Reads and writes can be made to fail on
//! demand.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use super::{KeyValueStorage, StorageError};

#[derive(Debug, Default)]
struct Inner {
    entries: RefCell<HashMap<String, Vec<u8>>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
    write_count: Cell<u32>,
}

/// Shared in-process [`KeyValueStorage`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Rc<Inner>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `read` fail (or succeed again).
    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.fail_reads.set(fail);
    }

    /// Makes every subsequent `write` fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.fail_writes.set(fail);
    }

    /// Stores `value` directly, bypassing failure injection.
    pub fn insert(&self, key: &str, value: impl Into<Vec<u8>>) {
        self.inner
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.into());
    }

    /// Returns the raw bytes under `key`, bypassing failure injection.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.entries.borrow().get(key).cloned()
    }

    /// Number of successful writes since creation.
    pub fn write_count(&self) -> u32 {
        self.inner.write_count.get()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        if self.inner.fail_reads.get() {
            return Err(StorageError::Unavailable(format!("read of {key:?} refused")));
        }
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        if self.inner.fail_writes.get() {
            return Err(StorageError::Unavailable(format!("write of {key:?} refused")));
        }
        self.insert(key, value);
        self.inner.write_count.set(self.inner.write_count.get() + 1);
        Ok(())
    }
}
