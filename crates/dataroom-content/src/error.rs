const MIB: u64 = 1024 * 1024;

/// Errors from content store operations.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Saving would push the store past its quota.
    #[error(
        "storage limit of {} would be exceeded: {requested} bytes requested, {used} in use",
        format_limit(.quota)
    )]
    CapacityExceeded { requested: u64, used: u64, quota: u64 },

    /// The store's lock was poisoned by a panicking writer.
    #[error("content store lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Result alias for content store operations.
pub type ContentResult<T> = Result<T, ContentError>;

/// Whole MiB when exact, one decimal above 1 MiB, bytes below.
fn format_limit(quota: &u64) -> String {
    let quota = *quota;
    if quota < MIB {
        format!("{quota} bytes")
    } else if quota % MIB == 0 {
        format!("{} MiB", quota / MIB)
    } else {
        format!("{:.1} MiB", quota as f64 / MIB as f64)
    }
}
