use dataroom_types::StorageKey;

use crate::content::StoredContent;
use crate::error::ContentResult;

/// Session-scoped content store.
///
/// All implementations must satisfy these invariants:
/// - A returned key is never reused for different content.
/// - `save` either stores the content and returns its key, or fails
///   without storing anything.
/// - Nothing is evicted to make room for new content.
/// - A missing key is reported as `Ok(None)`, never as an error.
pub trait ContentStore: Send + Sync {
    /// Store file content and return its freshly minted key.
    ///
    /// Fails with [`ContentError::CapacityExceeded`](crate::ContentError::CapacityExceeded)
    /// if the addition would exceed the quota.
    fn save(&self, content: StoredContent) -> ContentResult<StorageKey>;

    /// Fetch content by key. Returns `Ok(None)` if it is not (or no longer)
    /// present.
    fn get(&self, key: &StorageKey) -> ContentResult<Option<StoredContent>>;

    /// Total bytes currently held.
    fn used_bytes(&self) -> ContentResult<u64>;

    /// Maximum total bytes this store will hold.
    fn quota_bytes(&self) -> u64;

    /// Check whether content exists for a key.
    fn contains(&self, key: &StorageKey) -> ContentResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Bytes still available before the quota is reached.
    fn remaining_bytes(&self) -> ContentResult<u64> {
        Ok(self.quota_bytes().saturating_sub(self.used_bytes()?))
    }
}
