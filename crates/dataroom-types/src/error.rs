use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid {kind} id: {value:?}")]
    InvalidId { kind: &'static str, value: String },
}
