//! Error types for name handling.

use thiserror::Error;

/// Errors raised when a user-supplied name is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// The name is empty after trimming.
    #[error("name must not be empty")]
    Empty,

    /// A file rename would change or drop the extension.
    #[error("extension must stay {expected:?}: {name}")]
    ExtensionChanged { name: String, expected: String },
}

/// Convenience type alias for naming operations.
pub type Result<T> = std::result::Result<T, NameError>;
