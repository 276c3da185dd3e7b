//! The action protocol into the reducer.
//!
//! Actions serialize as `{"type": "CREATE_DATAROOM", "payload": {...}}` with
//! camelCase payload fields, so a recorded action log reads the same as
//! the persisted state.

use dataroom_types::{DataroomId, FileId, FolderId, StorageKey};
use serde::{Deserialize, Serialize};

/// One state transition request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
pub enum Action {
    /// Point the cursor at a room. No existence check.
    #[serde(rename_all = "camelCase")]
    SetCurrentDataroom { dataroom_id: Option<DataroomId> },

    /// Point the cursor at a folder. No existence check.
    #[serde(rename_all = "camelCase")]
    SetCurrentFolder { folder_id: Option<FolderId> },

    /// Create a room together with its root folder and navigate into it.
    CreateDataroom { name: String },

    #[serde(rename_all = "camelCase")]
    RenameDataroom { dataroom_id: DataroomId, name: String },

    /// Remove a room with every folder and file it contains.
    #[serde(rename_all = "camelCase")]
    DeleteDataroom { dataroom_id: DataroomId },

    #[serde(rename_all = "camelCase")]
    CreateFolder {
        dataroom_id: DataroomId,
        parent_id: FolderId,
        name: String,
    },

    /// Register metadata for content already saved under `storage_key`.
    #[serde(rename_all = "camelCase")]
    UploadFile {
        dataroom_id: DataroomId,
        parent_id: FolderId,
        name: String,
        mime_type: String,
        size: u64,
        storage_key: StorageKey,
    },

    #[serde(rename_all = "camelCase")]
    DeleteFile { file_id: FileId },

    /// Remove a folder subtree and all files in it. Root folders are refused.
    #[serde(rename_all = "camelCase")]
    DeleteFolder { folder_id: FolderId },

    #[serde(rename_all = "camelCase")]
    RenameFile { file_id: FileId, name: String },

    #[serde(rename_all = "camelCase")]
    RenameFolder { folder_id: FolderId, name: String },
}

impl Action {
    /// Stable wire name of this action, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetCurrentDataroom { .. } => "SET_CURRENT_DATAROOM",
            Self::SetCurrentFolder { .. } => "SET_CURRENT_FOLDER",
            Self::CreateDataroom { .. } => "CREATE_DATAROOM",
            Self::RenameDataroom { .. } => "RENAME_DATAROOM",
            Self::DeleteDataroom { .. } => "DELETE_DATAROOM",
            Self::CreateFolder { .. } => "CREATE_FOLDER",
            Self::UploadFile { .. } => "UPLOAD_FILE",
            Self::DeleteFile { .. } => "DELETE_FILE",
            Self::DeleteFolder { .. } => "DELETE_FOLDER",
            Self::RenameFile { .. } => "RENAME_FILE",
            Self::RenameFolder { .. } => "RENAME_FOLDER",
        }
    }

    /// Returns `true` for actions that only move the navigation cursor.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::SetCurrentDataroom { .. } | Self::SetCurrentFolder { .. }
        )
    }
}
