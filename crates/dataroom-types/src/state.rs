use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::{Dataroom, FileNode, Folder};
use crate::id::{DataroomId, FileId, FolderId};

/// The three flat entity maps. Tree structure lives in `parent_id` links.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataState {
    pub datarooms: BTreeMap<DataroomId, Dataroom>,
    pub folders: BTreeMap<FolderId, Folder>,
    pub files: BTreeMap<FileId, FileNode>,
}

impl DataState {
    pub fn dataroom(&self, id: &DataroomId) -> Option<&Dataroom> {
        self.datarooms.get(id)
    }

    pub fn folder(&self, id: &FolderId) -> Option<&Folder> {
        self.folders.get(id)
    }

    pub fn file(&self, id: &FileId) -> Option<&FileNode> {
        self.files.get(id)
    }

    /// The root folder of a room, if both exist.
    pub fn root_folder(&self, dataroom: &DataroomId) -> Option<&Folder> {
        let room = self.datarooms.get(dataroom)?;
        self.folders.get(&room.root_folder_id)
    }

    /// Folders directly under `parent` in `dataroom`, in id order.
    pub fn child_folders<'a>(
        &'a self,
        dataroom: &'a DataroomId,
        parent: &'a FolderId,
    ) -> impl Iterator<Item = &'a Folder> + 'a {
        self.folders
            .values()
            .filter(move |f| f.is_child_of(dataroom, parent))
    }

    /// Files directly under `parent` in `dataroom`, in id order.
    pub fn child_files<'a>(
        &'a self,
        dataroom: &'a DataroomId,
        parent: &'a FolderId,
    ) -> impl Iterator<Item = &'a FileNode> + 'a {
        self.files
            .values()
            .filter(move |f| f.is_child_of(dataroom, parent))
    }

    /// Returns `true` when no entity of any kind exists.
    pub fn is_empty(&self) -> bool {
        self.datarooms.is_empty() && self.folders.is_empty() && self.files.is_empty()
    }
}

/// The navigation cursor: which room and folder the front end is showing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub current_dataroom_id: Option<DataroomId>,
    pub current_folder_id: Option<FolderId>,
}

impl UiState {
    /// A cursor pointing at `folder` inside `dataroom`.
    pub fn at(dataroom: DataroomId, folder: FolderId) -> Self {
        Self {
            current_dataroom_id: Some(dataroom),
            current_folder_id: Some(folder),
        }
    }

    /// Both halves of the cursor, if both are set.
    pub fn location(&self) -> Option<(&DataroomId, &FolderId)> {
        Some((
            self.current_dataroom_id.as_ref()?,
            self.current_folder_id.as_ref()?,
        ))
    }

    /// Reset the cursor to nothing selected.
    pub fn clear(&mut self) {
        self.current_dataroom_id = None;
        self.current_folder_id = None;
    }
}

/// Everything the reducer owns: entity maps plus the cursor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub data: DataState,
    pub ui: UiState,
}

impl AppState {
    /// The empty initial state.
    pub fn new() -> Self {
        Self::default()
    }
}
