//! Collision-free sibling names.
//!
//! When a desired name is taken, a counter is inserted before the
//! extension: `report.pdf` → `report (1).pdf` → `report (2).pdf`.

use std::collections::HashSet;

/// Split a name into `(base, extension)` at the last `.`.
///
/// The extension keeps its dot. There is no split when the name has no
/// dot, starts with its only dot (`.env`), or ends with a dot (`draft.`).
///
/// ```
/// use dataroom_naming::split_extension;
///
/// assert_eq!(split_extension("report.pdf"), ("report", ".pdf"));
/// assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
/// assert_eq!(split_extension(".env"), (".env", ""));
/// assert_eq!(split_extension("notes"), ("notes", ""));
/// ```
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Return `desired` if no sibling uses it, else the first free
/// `"{base} ({n}){ext}"` for `n = 1, 2, ...`.
///
/// # Examples
///
/// ```
/// use dataroom_naming::unique_name;
///
/// assert_eq!(unique_name("report.pdf", ["a.pdf"]), "report.pdf");
/// assert_eq!(unique_name("report.pdf", ["report.pdf"]), "report (1).pdf");
/// assert_eq!(
///     unique_name("report.pdf", ["report.pdf", "report (1).pdf"]),
///     "report (2).pdf"
/// );
/// ```
pub fn unique_name<I, S>(desired: &str, existing: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let taken: HashSet<String> = existing
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect();

    if !taken.contains(desired) {
        return desired.to_string();
    }

    let (base, ext) = split_extension(desired);
    let mut counter: u64 = 1;
    loop {
        let candidate = format!("{base} ({counter}){ext}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}
