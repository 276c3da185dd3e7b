//! Walking the folder hierarchy encoded in `parent_id` links.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use dataroom_types::{Folder, FolderId};

/// Index from parent id to the ids of its direct child folders.
fn children_index(folders: &BTreeMap<FolderId, Folder>) -> HashMap<&FolderId, Vec<&FolderId>> {
    let mut index: HashMap<&FolderId, Vec<&FolderId>> = HashMap::new();
    for folder in folders.values() {
        if let Some(parent) = &folder.parent_id {
            index.entry(parent).or_default().push(&folder.id);
        }
    }
    index
}

/// Collect `root` and every folder beneath it.
///
/// Returns an empty set when `root` is not a known folder. The walk keeps a
/// visited set, so a corrupted parent cycle terminates instead of looping.
pub fn collect_subtree(folders: &BTreeMap<FolderId, Folder>, root: &FolderId) -> BTreeSet<FolderId> {
    let mut collected = BTreeSet::new();
    if !folders.contains_key(root) {
        return collected;
    }

    let index = children_index(folders);
    let mut visited: HashSet<&FolderId> = HashSet::new();
    let mut stack = vec![root];

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        collected.insert(current.clone());
        if let Some(children) = index.get(current) {
            stack.extend(children.iter().copied());
        }
    }

    collected
}

/// The parent chain of `folder`, nearest first, excluding `folder` itself.
///
/// Stops at the first missing parent or on revisiting an id.
pub fn ancestors(folders: &BTreeMap<FolderId, Folder>, folder: &FolderId) -> Vec<FolderId> {
    let mut chain = Vec::new();
    let mut seen: HashSet<&FolderId> = HashSet::from([folder]);
    let mut current = folders.get(folder).and_then(|f| f.parent_id.as_ref());

    while let Some(parent) = current {
        if !seen.insert(parent) {
            break;
        }
        chain.push(parent.clone());
        current = folders.get(parent).and_then(|f| f.parent_id.as_ref());
    }

    chain
}
