use thiserror::Error;

/// Errors from slot backends and the stores built on them.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The slot key cannot be used by this backend.
    #[error("invalid slot key: {key:?}")]
    InvalidKey { key: String },

    /// State could not be encoded for saving.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend's lock was poisoned by a panicking writer.
    #[error("slot lock poisoned: {0}")]
    LockPoisoned(String),

    /// I/O error in a file-backed slot.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for persistence operations.
pub type PersistResult<T> = std::result::Result<T, PersistError>;
