use dataroom_types::AppState;

use crate::tree::ancestors;

/// Point the cursor at something that still exists after a mutation.
///
/// Only entities present in `before` and absent from `after` are considered,
/// so a cursor that was already dangling before the transition is left as
/// it was. When the current room was removed both cursor fields are
/// cleared. When only the current folder was removed the cursor moves to
/// the nearest surviving ancestor, then to the room's root, then to
/// nothing.
pub fn repair_cursor(before: &AppState, after: &mut AppState) {
    let room_removed = after.ui.current_dataroom_id.as_ref().is_some_and(|room| {
        before.data.datarooms.contains_key(room) && !after.data.datarooms.contains_key(room)
    });
    if room_removed {
        after.ui.clear();
        return;
    }

    let Some(folder_id) = after.ui.current_folder_id.clone() else {
        return;
    };
    let Some(removed) = before.data.folders.get(&folder_id) else {
        return;
    };
    if after.data.folders.contains_key(&folder_id) {
        return;
    }

    let surviving_ancestor = ancestors(&before.data.folders, &folder_id)
        .into_iter()
        .find(|id| after.data.folders.contains_key(id));

    let relocated = surviving_ancestor.or_else(|| {
        after
            .data
            .root_folder(&removed.dataroom_id)
            .map(|root| root.id.clone())
    });
    after.ui.current_folder_id = relocated;
}
