//! Foundation types for the data room.
//!
//! Every other data room crate depends on `dataroom-types`. The model is
//! flat: data rooms, folders and files live in three id-keyed maps, and the
//! tree is reconstructed through `parent_id` links.
//!
//! # Key Types
//!
//! - [`DataroomId`], [`FolderId`], [`FileId`]: typed entity identifiers
//! - [`StorageKey`]: opaque handle into the content store
//! - [`Dataroom`], [`Folder`], [`FileNode`]: the three entity kinds
//! - [`DataState`]: the id → entity maps
//! - [`UiState`]: the navigation cursor
//! - [`AppState`]: everything the reducer owns and the state store persists

pub mod entity;
pub mod error;
pub mod id;
pub mod state;

pub use entity::{Dataroom, FileNode, Folder, Timestamp, ROOT_FOLDER_NAME};
pub use error::TypeError;
pub use id::{base36, DataroomId, FileId, FolderId, IdKind, StorageKey};
pub use state::{AppState, DataState, UiState};
