//! Durable slots for the data room.
//!
//! Persistence is a flat string-keyed slot space. Two slots matter:
//!
//! - `dataroom-state-v1` holds the whole [`AppState`](dataroom_types::AppState)
//!   as JSON, read through [`StateStore`]
//! - `demo-auth` holds the demo login flag, read through [`AuthFlag`]
//!
//! # Backends
//!
//! All backends implement the [`SlotBackend`] trait:
//!
//! - [`MemoryBackend`] -- `HashMap` behind a `RwLock`, for tests and
//!   throwaway sessions
//! - [`DirectoryBackend`] -- one file per slot inside a directory
//!
//! File content is never persisted. Saved state carries file metadata only.

pub mod auth;
pub mod backend;
pub mod directory;
pub mod error;
pub mod memory;
pub mod state;

pub use auth::{AuthFlag, AUTH_KEY};
pub use backend::SlotBackend;
pub use directory::DirectoryBackend;
pub use error::{PersistError, PersistResult};
pub use memory::MemoryBackend;
pub use state::{StateStore, STATE_KEY};
