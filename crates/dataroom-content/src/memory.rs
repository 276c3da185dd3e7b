use std::collections::HashMap;
use std::sync::RwLock;

use dataroom_types::StorageKey;
use tracing::{debug, warn};

use crate::content::StoredContent;
use crate::error::{ContentError, ContentResult};
use crate::key::generate_storage_key;
use crate::traits::ContentStore;

/// Default quota: 500 MiB.
pub const DEFAULT_QUOTA_BYTES: u64 = 500 * 1024 * 1024;

struct Inner {
    blobs: HashMap<StorageKey, StoredContent>,
    used: u64,
}

/// In-memory, HashMap-based content store with a cumulative byte quota.
///
/// Content is dropped with the store. The store only grows: there is no
/// delete, so `used_bytes` is the sum of every successful `save`.
pub struct InMemoryContentStore {
    inner: RwLock<Inner>,
    quota: u64,
}

impl InMemoryContentStore {
    /// Create an empty store with the default 500 MiB quota.
    pub fn new() -> Self {
        Self::with_quota(DEFAULT_QUOTA_BYTES)
    }

    /// Create an empty store with an explicit quota in bytes.
    pub fn with_quota(quota: u64) -> Self {
        Self {
            inner: RwLock::new(Inner {
                blobs: HashMap::new(),
                used: 0,
            }),
            quota,
        }
    }

    /// Number of blobs currently stored.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.blobs.len()).unwrap_or(0)
    }

    /// Returns `true` if nothing has been saved.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStore for InMemoryContentStore {
    fn save(&self, content: StoredContent) -> ContentResult<StorageKey> {
        let size = content.size();
        let mut inner = self
            .inner
            .write()
            .map_err(|e| ContentError::LockPoisoned(e.to_string()))?;

        let within_quota = inner
            .used
            .checked_add(size)
            .is_some_and(|total| total <= self.quota);
        if !within_quota {
            warn!(
                name = %content.name,
                requested = size,
                used = inner.used,
                quota = self.quota,
                "content rejected: quota exceeded"
            );
            return Err(ContentError::CapacityExceeded {
                requested: size,
                used: inner.used,
                quota: self.quota,
            });
        }

        let mut key = generate_storage_key();
        while inner.blobs.contains_key(&key) {
            key = generate_storage_key();
        }

        debug!(key = %key, name = %content.name, size, "content saved");
        inner.blobs.insert(key.clone(), content);
        inner.used += size;
        Ok(key)
    }

    fn get(&self, key: &StorageKey) -> ContentResult<Option<StoredContent>> {
        let inner = self
            .inner
            .read()
            .map_err(|e| ContentError::LockPoisoned(e.to_string()))?;
        Ok(inner.blobs.get(key).cloned())
    }

    fn used_bytes(&self) -> ContentResult<u64> {
        let inner = self
            .inner
            .read()
            .map_err(|e| ContentError::LockPoisoned(e.to_string()))?;
        Ok(inner.used)
    }

    fn quota_bytes(&self) -> u64 {
        self.quota
    }
}

impl std::fmt::Debug for InMemoryContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryContentStore")
            .field("blob_count", &self.len())
            .field("quota", &self.quota)
            .finish()
    }
}
