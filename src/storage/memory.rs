//! In-memory slot store

use std::cell::RefCell;
use std::collections::HashMap;

use super::{CartStorage, StorageError};

/// Keeps slots in a map for the lifetime of the value
///
/// Useful for tests and for sessions that should not leave anything behind.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with one slot already populated
    pub fn with_slot(key: &str, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage
            .slots
            .borrow_mut()
            .insert(key.to_string(), value.into());
        storage
    }

    /// Returns a copy of the raw value in a slot
    pub fn raw(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
