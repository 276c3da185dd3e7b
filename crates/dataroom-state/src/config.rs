use serde::{Deserialize, Serialize};

/// Whether sibling folders may share a name on creation.
///
/// Renames always de-duplicate among siblings; this only governs
/// `CreateFolder`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FolderNamePolicy {
    /// Keep the requested name even if a sibling folder already uses it.
    #[default]
    AllowDuplicates,
    /// Apply the same `name (n)` suffixing as file uploads.
    Deduplicate,
}

/// Mutations that may bump the owning data room's `updated_at`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mutation {
    CreateFolder,
    UploadFile,
    RenameFolder,
    RenameFile,
    DeleteFolder,
    DeleteFile,
}

/// Which mutations touch the owning data room's `updated_at`.
///
/// Renaming the room itself always updates its own timestamp and is not
/// covered here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchPolicy {
    pub create_folder: bool,
    pub upload_file: bool,
    pub rename_folder: bool,
    pub rename_file: bool,
    pub delete_folder: bool,
    pub delete_file: bool,
}

impl Default for TouchPolicy {
    fn default() -> Self {
        Self {
            create_folder: true,
            upload_file: true,
            rename_folder: false,
            rename_file: false,
            delete_folder: true,
            delete_file: true,
        }
    }
}

impl TouchPolicy {
    /// Every mutation bumps the room timestamp.
    pub fn all() -> Self {
        Self {
            create_folder: true,
            upload_file: true,
            rename_folder: true,
            rename_file: true,
            delete_folder: true,
            delete_file: true,
        }
    }

    /// Returns `true` if `mutation` should bump the room's `updated_at`.
    pub fn bumps(&self, mutation: Mutation) -> bool {
        match mutation {
            Mutation::CreateFolder => self.create_folder,
            Mutation::UploadFile => self.upload_file,
            Mutation::RenameFolder => self.rename_folder,
            Mutation::RenameFile => self.rename_file,
            Mutation::DeleteFolder => self.delete_folder,
            Mutation::DeleteFile => self.delete_file,
        }
    }
}

/// Policies applied by the reducer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReducerConfig {
    pub folder_names: FolderNamePolicy,
    pub touch: TouchPolicy,
}
