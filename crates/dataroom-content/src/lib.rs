//! Ephemeral content storage for uploaded files.
//!
//! File metadata lives in the persisted application state; the bytes live
//! here, keyed by an opaque [`StorageKey`](dataroom_types::StorageKey), for
//! the lifetime of the owning session only. A restarted process starts with
//! an empty store while the metadata survives, so every consumer must treat
//! a missing blob as a normal condition.
//!
//! # Storage Backends
//!
//! All backends implement the [`ContentStore`] trait:
//!
//! - [`InMemoryContentStore`] -- `HashMap`-based store with a byte quota
//!
//! # Design Rules
//!
//! 1. Content is immutable once saved; a key always maps to the same bytes.
//! 2. Keys are unique for the lifetime of a store.
//! 3. `save` never evicts. When the quota would be exceeded it fails and
//!    the caller must not register file metadata for that content.
//! 4. The store never interprets content bytes.

pub mod content;
pub mod error;
pub mod key;
pub mod memory;
pub mod traits;

pub use content::StoredContent;
pub use error::{ContentError, ContentResult};
pub use key::generate_storage_key;
pub use memory::{InMemoryContentStore, DEFAULT_QUOTA_BYTES};
pub use traits::ContentStore;
