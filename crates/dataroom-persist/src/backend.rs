use std::sync::Arc;

use crate::error::PersistResult;

/// String-keyed storage of string values.
///
/// Implementations must be thread-safe (`Send + Sync`). Each call is atomic
/// with respect to a single key; there are no multi-key transactions.
pub trait SlotBackend: Send + Sync {
    /// Read a slot. Returns `Ok(None)` if it was never written or was removed.
    fn get(&self, key: &str) -> PersistResult<Option<String>>;

    /// Create or overwrite a slot.
    fn set(&self, key: &str, value: &str) -> PersistResult<()>;

    /// Remove a slot. Returns `Ok(true)` if it existed.
    fn remove(&self, key: &str) -> PersistResult<bool>;

    /// Returns `true` if the slot holds a value.
    fn contains(&self, key: &str) -> PersistResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<B: SlotBackend + ?Sized> SlotBackend for &B {
    fn get(&self, key: &str) -> PersistResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> PersistResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> PersistResult<bool> {
        (**self).remove(key)
    }
}

impl<B: SlotBackend + ?Sized> SlotBackend for Arc<B> {
    fn get(&self, key: &str) -> PersistResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> PersistResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> PersistResult<bool> {
        (**self).remove(key)
    }
}
