use snafu::Snafu;
use tracing::debug;

use super::node::{Directory, Node};
use super::path::split_leaf;

/// Outcome of resolving a path against a tree.
///
/// Every operation acts on the `{parent, name, node}` triple: `node` tells
/// whether the leaf exists and `parent` is where it would be created.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolved<'a> {
    /// The path addressed the root itself. It has no parent and no name.
    Root(&'a Directory),
    Entry {
        parent: &'a Directory,
        name: String,
        node: Option<&'a Node>,
    },
}

impl<'a> Resolved<'a> {
    pub fn exists(&self) -> bool {
        match self {
            Resolved::Root(_) => true,
            Resolved::Entry { node, .. } => node.is_some(),
        }
    }

    /// The resolved directory, if the path names one.
    pub fn directory(&self) -> Option<&'a Directory> {
        match *self {
            Resolved::Root(root) => Some(root),
            Resolved::Entry { node, .. } => node.and_then(Node::as_dir),
        }
    }
}

/// Mutable counterpart of [`Resolved`]. The leaf is looked up through
/// `parent` so the caller can insert, replace or remove it.
#[derive(Debug)]
pub enum ResolvedMut<'a> {
    Root(&'a mut Directory),
    Entry {
        parent: &'a mut Directory,
        name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum ResolveError {
    #[snafu(display("No such directory '{}'", segment))]
    MissingAncestor { segment: String },
    #[snafu(display("Cannot descend into file '{}'", segment))]
    ThroughFile { segment: String },
}

pub fn resolve<'a>(root: &'a Directory, path: &str) -> Result<Resolved<'a>, ResolveError> {
    let Some((ancestors, name)) = split_leaf(path) else {
        return Ok(Resolved::Root(root));
    };

    let mut current = root;
    for segment in ancestors {
        current = match current.get(&segment) {
            Some(Node::Directory(dir)) => dir,
            Some(Node::File { .. }) => return Err(ResolveError::ThroughFile { segment }),
            None => return Err(ResolveError::MissingAncestor { segment }),
        };
    }

    let node = current.get(&name);
    debug!("Resolved '{}' (exists: {})", path, node.is_some());
    Ok(Resolved::Entry {
        parent: current,
        name,
        node,
    })
}

pub fn resolve_mut<'a>(
    root: &'a mut Directory,
    path: &str,
) -> Result<ResolvedMut<'a>, ResolveError> {
    let Some((ancestors, name)) = split_leaf(path) else {
        return Ok(ResolvedMut::Root(root));
    };

    let mut current = root;
    for segment in ancestors {
        current = match current.get_mut(&segment) {
            Some(Node::Directory(dir)) => dir,
            Some(Node::File { .. }) => return Err(ResolveError::ThroughFile { segment }),
            None => return Err(ResolveError::MissingAncestor { segment }),
        };
    }

    Ok(ResolvedMut::Entry {
        parent: current,
        name,
    })
}
