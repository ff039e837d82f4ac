//! Virtual hierarchical filesystem.
//!
//! This module provides an owned tree of directories and files, the path
//! resolution every operation shares, and the binding of the tree to a
//! key-value store that keeps it across sessions.

mod default_tree;
mod error;
mod node;
pub mod path;
mod resolver;
pub mod snapshot;
mod vfs;

pub use default_tree::{HOME_DIR, default_tree};
pub use error::VfsError;
pub use node::{DirEntry, Directory, EntryKind, Node};
pub use resolver::{ResolveError, Resolved, ResolvedMut, resolve, resolve_mut};
pub use vfs::{DEFAULT_STORAGE_KEY, LoadFailure, LoadOutcome, Vfs};
