//! In-memory persistence slot.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::PersistenceSlot;
use crate::error::PersistenceError;

/// Slot kept in process memory. Contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemorySlot {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    writes: AtomicUsize,
}

impl MemorySlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot with `bytes` already stored under `key`.
    pub fn with_entry(key: &str, bytes: impl Into<Vec<u8>>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), bytes.into());
        MemorySlot {
            entries: Mutex::new(entries),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of successful writes since creation.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl PersistenceSlot for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        let entries = self.entries.lock().map_err(|_| PersistenceError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), PersistenceError> {
        let mut entries = self.entries.lock().map_err(|_| PersistenceError::Poisoned)?;
        entries.insert(key.to_string(), bytes.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write() {
        let slot = MemorySlot::new();
        assert_eq!(slot.read("cart").unwrap(), None);

        slot.write("cart", b"[]").unwrap();
        slot.write("cart", b"[1]").unwrap();

        assert_eq!(slot.read("cart").unwrap(), Some(b"[1]".to_vec()));
        assert_eq!(slot.read("other").unwrap(), None);
        assert_eq!(slot.write_count(), 2);
    }

    #[test]
    fn test_seeded_entry_is_not_a_write() {
        let slot = MemorySlot::with_entry("cart", "[]");
        assert_eq!(slot.read("cart").unwrap(), Some(b"[]".to_vec()));
        assert_eq!(slot.write_count(), 0);
    }
}
