use std::time::{SystemTime, UNIX_EPOCH};

use dataroom_types::{base36, StorageKey};

/// Number of random base-36 characters in a storage key.
const RANDOM_SUFFIX_LEN: usize = 8;

/// Mint a storage key of the form `{epoch-millis}_{8 random base36 chars}`.
///
/// Keys are opaque to every consumer; the time prefix only makes
/// collisions within a session practically impossible.
pub fn generate_storage_key() -> StorageKey {
    let epoch_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    StorageKey::new(format!(
        "{epoch_ms}_{}",
        base36::random(RANDOM_SUFFIX_LEN)
    ))
}
