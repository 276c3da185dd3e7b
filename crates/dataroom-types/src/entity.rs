use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{DataroomId, FileId, FolderId, StorageKey};

/// Wall-clock instant attached to every entity. Serialized as RFC 3339.
pub type Timestamp = DateTime<Utc>;

/// Name given to the folder created together with each data room.
pub const ROOT_FOLDER_NAME: &str = "Root";

/// A top-level container isolating one independent folder/file tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataroom {
    pub id: DataroomId,
    pub name: String,
    /// The folder created atomically with this room. Never deleted on its own.
    pub root_folder_id: FolderId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Dataroom {
    /// Returns `true` if `folder` is this room's root.
    pub fn is_root(&self, folder: &FolderId) -> bool {
        &self.root_folder_id == folder
    }
}

/// A folder inside a data room. Only the root has no parent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: FolderId,
    pub dataroom_id: DataroomId,
    pub name: String,
    pub parent_id: Option<FolderId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Folder {
    /// Returns `true` for the parentless folder of a room.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Returns `true` if this folder sits directly under `parent` in `dataroom`.
    pub fn is_child_of(&self, dataroom: &DataroomId, parent: &FolderId) -> bool {
        &self.dataroom_id == dataroom && self.parent_id.as_ref() == Some(parent)
    }
}

/// File metadata. Content lives in the content store under `storage_key`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    pub id: FileId,
    pub dataroom_id: DataroomId,
    pub parent_id: FolderId,
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub storage_key: StorageKey,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl FileNode {
    /// Returns `true` if this file sits directly under `parent` in `dataroom`.
    pub fn is_child_of(&self, dataroom: &DataroomId, parent: &FolderId) -> bool {
        &self.dataroom_id == dataroom && &self.parent_id == parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> Timestamp {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn folder_serializes_camel_case_with_null_parent() {
        let folder = Folder {
            id: FolderId::new("folder-root_a"),
            dataroom_id: DataroomId::new("dr_a"),
            name: ROOT_FOLDER_NAME.into(),
            parent_id: None,
            created_at: at(0),
            updated_at: at(0),
        };
        let json = serde_json::to_value(&folder).unwrap();
        assert_eq!(json["dataroomId"], "dr_a");
        assert!(json["parentId"].is_null());
        assert_eq!(json["createdAt"], "1970-01-01T00:00:00Z");
        assert!(folder.is_root());
    }

    #[test]
    fn file_child_check_matches_room_and_parent() {
        let file = FileNode {
            id: FileId::new("file_1"),
            dataroom_id: DataroomId::new("dr_a"),
            parent_id: FolderId::new("folder_1"),
            name: "report.pdf".into(),
            mime_type: "application/pdf".into(),
            size: 10,
            storage_key: StorageKey::new("1_abcdefgh"),
            created_at: at(5),
            updated_at: at(5),
        };
        assert!(file.is_child_of(&DataroomId::new("dr_a"), &FolderId::new("folder_1")));
        assert!(!file.is_child_of(&DataroomId::new("dr_b"), &FolderId::new("folder_1")));

        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["mimeType"], "application/pdf");
        assert_eq!(json["storageKey"], "1_abcdefgh");
    }

    #[test]
    fn dataroom_knows_its_root() {
        let room = Dataroom {
            id: DataroomId::new("dr_a"),
            name: "Acme".into(),
            root_folder_id: FolderId::new("folder-root_a"),
            created_at: at(1),
            updated_at: at(1),
        };
        assert!(room.is_root(&FolderId::new("folder-root_a")));
        assert!(!room.is_root(&FolderId::new("folder_b")));
    }
}
