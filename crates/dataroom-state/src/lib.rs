//! Domain reducer for the data room.
//!
//! This crate is the heart of the data room. It provides:
//! - The [`Action`] protocol dispatched by front ends
//! - [`Reducer`], a pure `(state, action) -> state` transition with an
//!   injected [`Environment`] for clocks and id generation
//! - Explicit mutation policies ([`ReducerConfig`]) for folder-name
//!   de-duplication and data room timestamp bumps
//! - Cascading subtree deletion and a single cursor-repair step
//! - Read-only queries: folder listings, search filtering, breadcrumbs and
//!   folder trees
//!
//! Invalid target ids never produce errors. The reducer returns the state
//! unchanged and reports why through [`Outcome`].

pub mod action;
pub mod config;
pub mod cursor;
pub mod env;
pub mod query;
pub mod reducer;
pub mod tree;

pub use action::Action;
pub use config::{FolderNamePolicy, Mutation, ReducerConfig, TouchPolicy};
pub use cursor::repair_cursor;
pub use env::{Environment, FixedEnvironment, SystemEnvironment};
pub use query::{
    breadcrumbs, children, current_listing, filter_listing, folder_tree, format_size, Crumb,
    FolderNode, Listing, Node,
};
pub use reducer::{
    check_parent, reduce, reduce_with_outcome, Outcome, Reducer, Reduction, Target,
};
pub use tree::{ancestors, collect_subtree};
