//! In-memory gate storage

use std::cell::RefCell;

use super::{decode_gates, GateStore, StoreError};
use crate::gate::Gate;

/// Keeps the encoded collection in memory, as a key-value host would.
///
/// Useful for tests and for running without touching the disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RefCell<Option<String>>,
    saves: RefCell<usize>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding raw encoded data
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            data: RefCell::new(Some(raw.into())),
            saves: RefCell::new(0),
        }
    }

    /// The raw encoded collection, if anything was stored
    pub fn raw(&self) -> Option<String> {
        self.data.borrow().clone()
    }

    /// How many times the collection has been written
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl GateStore for MemoryStore {
    fn load_gates(&self) -> Vec<Gate> {
        let data = self.data.borrow();
        let Some(raw) = data.as_deref() else {
            return Vec::new();
        };

        decode_gates(raw).unwrap_or_else(|e| {
            tracing::warn!("stored gates are malformed, starting empty: {}", e);
            Vec::new()
        })
    }

    fn save_gates(&self, gates: &[Gate]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(gates)?;
        *self.data.borrow_mut() = Some(raw);
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store() {
        let store = MemoryStore::new();
        assert!(store.load_gates().is_empty());
        assert_eq!(store.raw(), None);
    }

    #[test]
    fn test_garbage_is_empty() {
        let store = MemoryStore::with_raw("[1, 2, 3]");
        assert!(store.load_gates().is_empty());
    }

    #[test]
    fn test_save_counts() {
        let store = MemoryStore::new();
        store.save_gates(&[]).unwrap();
        store.save_gates(&[]).unwrap();

        assert_eq!(store.save_count(), 2);
        assert_eq!(store.raw().as_deref(), Some("[]"));
    }
}
