use derive_more::Display;
use snafu::{OptionExt, ResultExt, Snafu, ensure};
use tracing::{debug, info, warn};

use super::default_tree::default_tree;
use super::error::{
    AlreadyExistsSnafu, EncodeSnafu, InvalidPathSnafu, NoSuchDirectorySnafu, NotADirectorySnafu,
    NotAFileSnafu, NotFoundSnafu, PathIsDirectorySnafu, PersistSnafu, TooDeepSnafu, VfsError,
};
use super::node::{DirEntry, Directory, Node};
use super::path::{normalize, segments};
use super::resolver::{Resolved, ResolvedMut, resolve, resolve_mut};
use super::snapshot::{self, MAX_DEPTH, SnapshotError};
use crate::storage::{KeyValueStore, StoreError};

/// Key the filesystem is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "nebula-fs-v1";

/// How the tree of a freshly loaded [`Vfs`] came to be.
#[derive(Debug, Display)]
pub enum LoadOutcome {
    #[display("restored from storage")]
    Restored,
    #[display("nothing stored yet, using the default tree")]
    Fresh,
    #[display("stored state discarded ({reason}), using the default tree")]
    Recovered { reason: LoadFailure },
}

impl LoadOutcome {
    /// True when the default tree is in use.
    pub fn is_defaulted(&self) -> bool {
        !matches!(self, LoadOutcome::Restored)
    }
}

#[derive(Debug, Snafu)]
pub enum LoadFailure {
    #[snafu(display("storage could not be read"))]
    Unreadable { source: StoreError },
    #[snafu(display("stored tree is corrupt"))]
    Corrupt { source: SnapshotError },
}

/// In-memory tree bound to a persistence medium.
///
/// All paths are absolute; relative navigation is up to the caller. Every
/// successful mutation writes the whole tree to the store before returning.
/// A mutation is applied to a copy of the tree which only replaces the live
/// tree once the store accepted it, so a failed call never leaves a partial
/// change behind.
#[derive(Debug)]
pub struct Vfs<S> {
    root: Directory,
    store: S,
    key: String,
}

impl<S: KeyValueStore> Vfs<S> {
    /// Loads the tree stored under `key`, falling back to the default tree
    /// when nothing usable is stored. Never fails; the outcome says which
    /// path was taken.
    pub fn load(store: S, key: impl Into<String>) -> (Self, LoadOutcome) {
        let key = key.into();
        let (root, outcome) = match Self::read_stored(&store, &key) {
            Ok(Some(root)) => (root, LoadOutcome::Restored),
            Ok(None) => (default_tree(), LoadOutcome::Fresh),
            Err(reason) => {
                warn!("Discarding stored filesystem '{}': {}", key, reason);
                (default_tree(), LoadOutcome::Recovered { reason })
            }
        };
        info!("Filesystem '{}' {}", key, outcome);

        (Self { root, store, key }, outcome)
    }

    /// Wraps an existing tree without touching the store.
    pub fn with_root(store: S, key: impl Into<String>, root: Directory) -> Self {
        Self {
            root,
            store,
            key: key.into(),
        }
    }

    fn read_stored(store: &S, key: &str) -> Result<Option<Directory>, LoadFailure> {
        let Some(raw) = store.get(key).context(UnreadableSnafu)? else {
            return Ok(None);
        };
        snapshot::decode(&raw).map(Some).context(CorruptSnafu)
    }

    /// Writes the current tree to the store.
    pub fn save(&mut self) -> Result<(), VfsError> {
        persist(&mut self.store, &self.key, &self.root)
    }

    /// Entries of the directory at `path`. Anything that is not a directory
    /// lists as empty; use [`Vfs::read_dir`] to tell the cases apart.
    pub fn list(&self, path: &str) -> Vec<DirEntry> {
        resolve(&self.root, path)
            .ok()
            .and_then(|resolved| resolved.directory())
            .map(|dir| dir.entries().collect())
            .unwrap_or_default()
    }

    pub fn read_dir(&self, path: &str) -> Result<Vec<DirEntry>, VfsError> {
        let path = normalize(path);
        let resolved = resolve(&self.root, &path)
            .ok()
            .filter(Resolved::exists)
            .context(NotFoundSnafu { path: &path })?;

        resolved
            .directory()
            .map(|dir| dir.entries().collect())
            .context(NotADirectorySnafu { path: &path })
    }

    pub fn mkdir(&mut self, path: &str) -> Result<(), VfsError> {
        let path = normalize(path);
        self.commit("mkdir", &path, |root| {
            create(root, &path, Node::empty_dir())
        })
    }

    pub fn touch(&mut self, path: &str) -> Result<(), VfsError> {
        let path = normalize(path);
        self.commit("touch", &path, |root| create(root, &path, Node::file("")))
    }

    /// Removes a file or a whole directory subtree.
    pub fn rm(&mut self, path: &str) -> Result<(), VfsError> {
        let path = normalize(path);
        self.commit("rm", &path, |root| match resolve_mut(root, &path) {
            Ok(ResolvedMut::Entry { parent, name }) => {
                ensure!(
                    parent.remove(&name).is_some(),
                    InvalidPathSnafu { path: &path }
                );
                Ok(())
            }
            Ok(ResolvedMut::Root(_)) | Err(_) => InvalidPathSnafu { path: &path }.fail(),
        })
    }

    pub fn read_file(&self, path: &str) -> Result<String, VfsError> {
        let path = normalize(path);
        match resolve(&self.root, &path) {
            Ok(Resolved::Entry {
                node: Some(Node::File { content }),
                ..
            }) => Ok(content.clone()),
            _ => NotAFileSnafu { path }.fail(),
        }
    }

    /// Overwrites the file at `path`, creating it if its parent directory
    /// exists.
    pub fn write_file(&mut self, path: &str, content: impl Into<String>) -> Result<(), VfsError> {
        let path = normalize(path);
        let content = content.into();
        self.commit("write", &path, |root| {
            check_depth(&path)?;
            match resolve_mut(root, &path) {
                Ok(ResolvedMut::Entry { parent, name }) => match parent.get_mut(&name) {
                    Some(Node::File { content: existing }) => {
                        *existing = content;
                        Ok(())
                    }
                    Some(Node::Directory(_)) => PathIsDirectorySnafu { path: &path }.fail(),
                    None => {
                        parent.insert(name, Node::File { content });
                        Ok(())
                    }
                },
                Ok(ResolvedMut::Root(_)) => PathIsDirectorySnafu { path: &path }.fail(),
                Err(_) => NoSuchDirectorySnafu { path: &path }.fail(),
            }
        })
    }

    pub fn exists(&self, path: &str) -> bool {
        resolve(&self.root, path).is_ok_and(|resolved| resolved.exists())
    }

    pub fn root(&self) -> &Directory {
        &self.root
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Applies `apply` to a copy of the tree, persists the copy and only then
    /// makes it the live tree.
    fn commit<T>(
        &mut self,
        operation: &str,
        path: &str,
        apply: impl FnOnce(&mut Directory) -> Result<T, VfsError>,
    ) -> Result<T, VfsError> {
        let mut staged = self.root.clone();
        let value = apply(&mut staged)?;
        persist(&mut self.store, &self.key, &staged)?;
        self.root = staged;

        debug!("Committed {} '{}'", operation, path);
        Ok(value)
    }
}

fn create(root: &mut Directory, path: &str, node: Node) -> Result<(), VfsError> {
    check_depth(path)?;
    match resolve_mut(root, path) {
        Ok(ResolvedMut::Entry { parent, name }) => {
            ensure!(!parent.contains(&name), AlreadyExistsSnafu { path });
            parent.insert(name, node);
            Ok(())
        }
        Ok(ResolvedMut::Root(_)) => AlreadyExistsSnafu { path }.fail(),
        Err(_) => InvalidPathSnafu { path }.fail(),
    }
}

/// Entries deeper than [`MAX_DEPTH`] could be saved but not loaded back.
fn check_depth(path: &str) -> Result<(), VfsError> {
    ensure!(
        segments(path).len() <= MAX_DEPTH,
        TooDeepSnafu {
            path,
            limit: MAX_DEPTH
        }
    );
    Ok(())
}

fn persist<S: KeyValueStore>(store: &mut S, key: &str, root: &Directory) -> Result<(), VfsError> {
    let encoded = snapshot::encode(root).context(EncodeSnafu)?;
    store.set(key, encoded).context(PersistSnafu { key })
}
