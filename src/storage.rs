//! Durable key-value storage seam.
//!
//! The browser build backs this with `localStorage`; tests and native
//! embedders use [`MemoryStorage`].

use std::cell::RefCell;
use std::collections::HashMap;

/// String storage with `localStorage` semantics.
///
/// Writes report success as `bool` and never fail loudly.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> bool;

    fn delete(&self, key: &str) -> bool;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key);
        true
    }
}
