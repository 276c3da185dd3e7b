//! Turning command-line words into entity ids.
//!
//! Arguments may be ids or names. Names are looked up in the open folder
//! (or among all rooms, for room arguments) and must match exactly.

use anyhow::{anyhow, bail, Result};
use dataroom_naming::extension_of;
use dataroom_types::{AppState, DataroomId, FileId, FolderId};

/// A room by id, or by name if exactly one room has it.
pub fn room(state: &AppState, query: &str) -> Result<DataroomId> {
    let by_id = DataroomId::new(query);
    if state.data.datarooms.contains_key(&by_id) {
        return Ok(by_id);
    }
    let mut matches = state.data.datarooms.values().filter(|r| r.name == query);
    match (matches.next(), matches.next()) {
        (Some(room), None) => Ok(room.id.clone()),
        (Some(_), Some(_)) => bail!("several data rooms are named {query:?}; use the id"),
        (None, _) => bail!("no data room named {query:?}"),
    }
}

/// A folder reached from `from` by a `/`-separated path, or by id.
///
/// A leading `/` starts at the room's root. `..` moves to the parent and
/// stays put at the root.
pub fn folder(state: &AppState, room: &DataroomId, from: &FolderId, path: &str) -> Result<FolderId> {
    let by_id = FolderId::new(path);
    if state
        .data
        .folder(&by_id)
        .is_some_and(|f| &f.dataroom_id == room)
    {
        return Ok(by_id);
    }

    let root = state
        .data
        .dataroom(room)
        .map(|r| r.root_folder_id.clone())
        .ok_or_else(|| anyhow!("data room {room} no longer exists"))?;
    let mut current = if path.starts_with('/') { root } else { from.clone() };

    for segment in path.split('/').filter(|s| !s.is_empty() && *s != ".") {
        current = if segment == ".." {
            state
                .data
                .folder(&current)
                .and_then(|f| f.parent_id.clone())
                .unwrap_or(current)
        } else {
            child_folder(state, room, &current, segment)?
        };
    }
    Ok(current)
}

/// A direct child folder of `parent`, by id or name.
pub fn child_folder(
    state: &AppState,
    room: &DataroomId,
    parent: &FolderId,
    query: &str,
) -> Result<FolderId> {
    let mut matches = state
        .data
        .child_folders(room, parent)
        .filter(|f| f.id.as_str() == query || f.name == query);
    match (matches.next(), matches.next()) {
        (Some(folder), None) => Ok(folder.id.clone()),
        (Some(_), Some(_)) => bail!("several folders are named {query:?}; use the id"),
        (None, _) => bail!("no folder named {query:?} here"),
    }
}

/// A file directly inside `parent`, by id or name.
pub fn file(state: &AppState, room: &DataroomId, parent: &FolderId, query: &str) -> Result<FileId> {
    state
        .data
        .child_files(room, parent)
        .find(|f| f.id.as_str() == query || f.name == query)
        .map(|f| f.id.clone())
        .ok_or_else(|| anyhow!("no file named {query:?} here"))
}

/// MIME type to declare for an upload when none was given.
pub fn guess_mime_type(name: &str) -> &'static str {
    match extension_of(name).as_deref() {
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}
