//! File extension helpers used by the rename precondition.

/// Lower-cased extension after the last `.`, without the dot.
///
/// Returns `None` when there is no dot, the dot is the first character, or
/// the dot is the last character.
///
/// ```
/// use dataroom_naming::extension_of;
///
/// assert_eq!(extension_of("Report.PDF").as_deref(), Some("pdf"));
/// assert_eq!(extension_of(".hidden"), None);
/// assert_eq!(extension_of("trailing."), None);
/// assert_eq!(extension_of("plain"), None);
/// ```
pub fn extension_of(name: &str) -> Option<String> {
    let idx = name.rfind('.')?;
    if idx == 0 || idx + 1 == name.len() {
        return None;
    }
    Some(name[idx + 1..].to_lowercase())
}

/// Whether renaming `old_name` to `new_name` keeps the extension.
///
/// Names without an extension may be renamed freely. Otherwise the new name
/// must carry the same extension (case-insensitive).
pub fn same_extension(old_name: &str, new_name: &str) -> bool {
    match extension_of(old_name) {
        None => true,
        Some(old) => extension_of(new_name).is_some_and(|new| new == old),
    }
}
