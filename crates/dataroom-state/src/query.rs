//! Read-only views over [`AppState`] for front ends.

use dataroom_types::{AppState, DataroomId, FileNode, Folder, FolderId, Timestamp};

use crate::tree::ancestors;

/// One row of a folder listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Node<'a> {
    Folder(&'a Folder),
    File(&'a FileNode),
}

impl<'a> Node<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Self::Folder(folder) => &folder.name,
            Self::File(file) => &file.name,
        }
    }

    pub fn updated_at(&self) -> Timestamp {
        match self {
            Self::Folder(folder) => folder.updated_at,
            Self::File(file) => file.updated_at,
        }
    }

    /// File size, or `None` for folders.
    pub fn size(&self) -> Option<u64> {
        match self {
            Self::Folder(_) => None,
            Self::File(file) => Some(file.size),
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder(_))
    }
}

/// The direct contents of one folder: folders first, then files, each
/// sorted by name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Listing<'a> {
    pub folders: Vec<&'a Folder>,
    pub files: Vec<&'a FileNode>,
}

impl<'a> Listing<'a> {
    pub fn len(&self) -> usize {
        self.folders.len() + self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }

    /// All rows in display order.
    pub fn nodes(&self) -> impl Iterator<Item = Node<'a>> + '_ {
        self.folders
            .iter()
            .map(|f| Node::Folder(*f))
            .chain(self.files.iter().map(|f| Node::File(*f)))
    }

    /// Keep rows whose name contains `term`, ignoring case and surrounding
    /// whitespace. A blank term keeps everything.
    pub fn filter(&self, term: &str) -> Listing<'a> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.clone();
        }
        let matches = |name: &str| name.to_lowercase().contains(&needle);
        Listing {
            folders: self.folders.iter().copied().filter(|f| matches(&f.name)).collect(),
            files: self.files.iter().copied().filter(|f| matches(&f.name)).collect(),
        }
    }
}

/// Free-function form of [`Listing::filter`].
pub fn filter_listing<'a>(listing: &Listing<'a>, term: &str) -> Listing<'a> {
    listing.filter(term)
}

/// Contents of `folder` in `dataroom`.
pub fn children<'a>(state: &'a AppState, dataroom: &DataroomId, folder: &FolderId) -> Listing<'a> {
    let mut folders: Vec<&'a Folder> = state
        .data
        .folders
        .values()
        .filter(|f| f.is_child_of(dataroom, folder))
        .collect();
    let mut files: Vec<&'a FileNode> = state
        .data
        .files
        .values()
        .filter(|f| f.is_child_of(dataroom, folder))
        .collect();
    folders.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Listing { folders, files }
}

/// Contents of the folder under the cursor, or `None` if nothing is open.
pub fn current_listing(state: &AppState) -> Option<Listing<'_>> {
    let (dataroom, folder) = state.ui.location()?;
    Some(children(state, dataroom, folder))
}

/// One step of a breadcrumb path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Crumb {
    pub id: FolderId,
    pub name: String,
}

/// Path from the room's root down to `folder`, inclusive.
///
/// Empty when `folder` is unknown.
pub fn breadcrumbs(state: &AppState, folder: &FolderId) -> Vec<Crumb> {
    let Some(target) = state.data.folder(folder) else {
        return Vec::new();
    };
    let mut path: Vec<Crumb> = ancestors(&state.data.folders, folder)
        .into_iter()
        .rev()
        .filter_map(|id| state.data.folder(&id))
        .map(|f| Crumb {
            id: f.id.clone(),
            name: f.name.clone(),
        })
        .collect();
    path.push(Crumb {
        id: target.id.clone(),
        name: target.name.clone(),
    });
    path
}

/// A folder and everything beneath it, for sidebar-style rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FolderNode {
    pub id: FolderId,
    pub name: String,
    /// Files directly inside this folder.
    pub file_count: usize,
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    /// Number of folders in this tree, including this one.
    pub fn folder_count(&self) -> usize {
        1 + self.children.iter().map(FolderNode::folder_count).sum::<usize>()
    }
}

/// The folder tree of `dataroom`, rooted at its root folder.
pub fn folder_tree(state: &AppState, dataroom: &DataroomId) -> Option<FolderNode> {
    let root = state.data.root_folder(dataroom)?;
    Some(build_node(state, dataroom, root, &mut vec![root.id.clone()]))
}

fn build_node(
    state: &AppState,
    dataroom: &DataroomId,
    folder: &Folder,
    path: &mut Vec<FolderId>,
) -> FolderNode {
    let listing = children(state, dataroom, &folder.id);
    let mut nodes = Vec::with_capacity(listing.folders.len());
    for child in listing.folders {
        if path.contains(&child.id) {
            continue;
        }
        path.push(child.id.clone());
        nodes.push(build_node(state, dataroom, child, path));
        path.pop();
    }
    FolderNode {
        id: folder.id.clone(),
        name: folder.name.clone(),
        file_count: listing.files.len(),
        children: nodes,
    }
}

/// Human-readable size: `-` for zero, then `B`, `KB` or `MB` with one
/// decimal place.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "-".to_string();
    }
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let kb = bytes as f64 / 1024.0;
    if kb < 1024.0 {
        return format!("{kb:.1} KB");
    }
    format!("{:.1} MB", kb / 1024.0)
}
