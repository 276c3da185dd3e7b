//! Pre-dispatch validation of user-supplied names.

use crate::error::{NameError, Result};
use crate::extension::{extension_of, same_extension};

/// Trim a user-supplied name and reject it if nothing is left.
///
/// ```
/// use dataroom_naming::validate_name;
///
/// assert_eq!(validate_name("  Q3 Board Pack ").unwrap(), "Q3 Board Pack");
/// assert!(validate_name("   ").is_err());
/// ```
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(NameError::Empty);
    }
    Ok(trimmed.to_string())
}

/// Validate a new file name against the current one.
///
/// The name is trimmed and must be non-empty, and the extension of the
/// current name (if any) must be preserved.
pub fn validate_file_rename(current: &str, proposed: &str) -> Result<String> {
    let name = validate_name(proposed)?;
    if !same_extension(current, &name) {
        return Err(NameError::ExtensionChanged {
            name,
            expected: extension_of(current).unwrap_or_default(),
        });
    }
    Ok(name)
}
