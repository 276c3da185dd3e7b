//! In-memory slot backend for tests and throwaway sessions.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::backend::SlotBackend;
use crate::error::{PersistError, PersistResult};

/// A [`SlotBackend`] holding every slot in a `HashMap` behind a `RwLock`.
///
/// Data is lost when the backend is dropped.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SlotBackend for MemoryBackend {
    fn get(&self, key: &str) -> PersistResult<Option<String>> {
        let slots = self
            .slots
            .read()
            .map_err(|e| PersistError::LockPoisoned(e.to_string()))?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PersistResult<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|e| PersistError::LockPoisoned(e.to_string()))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> PersistResult<bool> {
        let mut slots = self
            .slots
            .write()
            .map_err(|e| PersistError::LockPoisoned(e.to_string()))?;
        Ok(slots.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let backend = MemoryBackend::new();
        assert!(backend.is_empty());
        assert_eq!(backend.get("k").unwrap(), None);

        backend.set("k", "v1").unwrap();
        backend.set("k", "v2").unwrap();
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("v2"));
        assert!(backend.contains("k").unwrap());
        assert_eq!(backend.len(), 1);

        assert!(backend.remove("k").unwrap());
        assert!(!backend.remove("k").unwrap());
        assert!(!backend.contains("k").unwrap());
    }

    fn write_through<B: SlotBackend>(backend: B) {
        backend.set("a", "1").unwrap();
    }

    #[test]
    fn works_through_references() {
        let backend = MemoryBackend::new();
        write_through(&backend);
        assert_eq!(backend.get("a").unwrap().as_deref(), Some("1"));
    }
}
