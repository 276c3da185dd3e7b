//! Naming rules for data room entries.
//!
//! Both the reducer and the session's pre-dispatch checks go through this
//! crate, so collision handling and extension rules exist in one place.
//!
//! # Modules
//!
//! - [`error`]: Error type for rejected names
//! - [`unique`]: Collision-free sibling names (`report (1).pdf`)
//! - [`extension`]: Extension extraction and comparison
//! - [`validate`]: Pre-dispatch name validation

pub mod error;
pub mod extension;
pub mod unique;
pub mod validate;

pub use error::{NameError, Result};
pub use extension::{extension_of, same_extension};
pub use unique::{split_extension, unique_name};
pub use validate::{validate_file_rename, validate_name};
