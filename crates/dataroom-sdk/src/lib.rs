//! High-level API for the data room.
//!
//! [`Session`] ties together the reducer, the content store and the
//! persisted state slot. Front ends (the CLI included) talk to a session
//! instead of dispatching raw actions.

pub mod config;
pub mod error;
pub mod session;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use session::Session;

// Re-export key types
pub use dataroom_content::{ContentStore, InMemoryContentStore, StoredContent};
pub use dataroom_persist::{AuthFlag, DirectoryBackend, MemoryBackend, SlotBackend};
pub use dataroom_state::{
    breadcrumbs, folder_tree, format_size, Action, Crumb, FolderNode, Listing, Node, Outcome,
    Target,
};
pub use dataroom_types::{AppState, DataroomId, FileId, FolderId};
