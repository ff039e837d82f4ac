use derive_more::Display;
use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};

/// A single entry of the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    #[serde(rename = "file")]
    File { content: String },
    #[serde(rename = "dir")]
    Directory(Directory),
}

impl Node {
    pub fn file(content: impl Into<String>) -> Self {
        Node::File {
            content: content.into(),
        }
    }

    pub fn empty_dir() -> Self {
        Node::Directory(Directory::new())
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Node::File { .. } => EntryKind::File,
            Node::Directory(_) => EntryKind::Dir,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Node::File { .. })
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Directory(_))
    }

    pub fn as_dir(&self) -> Option<&Directory> {
        match self {
            Node::Directory(dir) => Some(dir),
            Node::File { .. } => None,
        }
    }
}

/// Directory node. Children are keyed by a single path segment and keep
/// their insertion order so listings are stable between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Directory {
    children: LinkedHashMap<String, Node>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used for seeded trees and tests.
    pub fn with_file(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.children.insert(name.into(), Node::file(content));
        self
    }

    pub fn with_dir(mut self, name: impl Into<String>, dir: Directory) -> Self {
        self.children.insert(name.into(), Node::Directory(dir));
        self
    }

    pub fn children(&self) -> &LinkedHashMap<String, Node> {
        &self.children
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = DirEntry> + '_ {
        self.children.iter().map(|(name, node)| DirEntry {
            name: name.clone(),
            kind: node.kind(),
        })
    }

    pub(crate) fn insert(&mut self, name: String, node: Node) -> Option<Node> {
        self.children.insert(name, node)
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<Node> {
        self.children.remove(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum EntryKind {
    #[display("file")]
    File,
    #[display("dir")]
    Dir,
}

/// One line of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}
