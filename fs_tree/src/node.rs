//! Node model
//!
//! This module defines the two kinds of entries that make up the namespace.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Children of a directory, keyed by entry name
///
/// Children sit behind `Arc` so that rebuilding one directory shares every
/// sibling subtree with the previous version of the tree.
pub type Children = BTreeMap<String, Arc<Node>>;

/// Kind of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Plain text file
    File,
    /// Directory holding named children
    Directory,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::File => write!(f, "file"),
            NodeKind::Directory => write!(f, "directory"),
        }
    }
}

/// A single entry in the namespace
///
/// A node's `name` always equals the key its parent stores it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A file with opaque text content
    File {
        /// Entry name
        name: String,
        /// File content
        content: String,
    },
    /// A directory
    Directory {
        /// Entry name (empty for the root)
        name: String,
        /// Child entries
        children: Children,
    },
}

impl Node {
    /// Creates a file node
    pub fn file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Node::File {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Creates an empty directory node
    pub fn directory(name: impl Into<String>) -> Self {
        Node::Directory {
            name: name.into(),
            children: Children::new(),
        }
    }

    /// Creates a directory node from prebuilt children
    ///
    /// Each child is keyed by its own name.
    pub fn directory_with<I>(name: impl Into<String>, children: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        let children = children
            .into_iter()
            .map(|child| (child.name().to_string(), Arc::new(child)))
            .collect();
        Node::Directory {
            name: name.into(),
            children,
        }
    }

    /// Returns the entry name
    pub fn name(&self) -> &str {
        match self {
            Node::File { name, .. } | Node::Directory { name, .. } => name,
        }
    }

    /// Returns the node kind
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::File { .. } => NodeKind::File,
            Node::Directory { .. } => NodeKind::Directory,
        }
    }

    /// Returns true if this is a directory
    pub fn is_directory(&self) -> bool {
        matches!(self, Node::Directory { .. })
    }

    /// Returns true if this is a file
    pub fn is_file(&self) -> bool {
        matches!(self, Node::File { .. })
    }

    /// Returns the file content, or `None` for a directory
    pub fn content(&self) -> Option<&str> {
        match self {
            Node::File { content, .. } => Some(content),
            Node::Directory { .. } => None,
        }
    }

    /// Returns the children map, or `None` for a file
    pub fn children(&self) -> Option<&Children> {
        match self {
            Node::Directory { children, .. } => Some(children),
            Node::File { .. } => None,
        }
    }

    /// Gets a child by name
    ///
    /// Always `None` for files.
    pub fn child(&self, name: &str) -> Option<&Arc<Node>> {
        self.children().and_then(|children| children.get(name))
    }

    /// Lists child names in lexicographic order
    pub fn entry_names(&self) -> Option<Vec<String>> {
        self.children()
            .map(|children| children.keys().cloned().collect())
    }

    /// Returns a copy of this node under a new name
    ///
    /// A directory's children are shared, not copied.
    pub fn renamed(&self, new_name: impl Into<String>) -> Node {
        match self {
            Node::File { content, .. } => Node::File {
                name: new_name.into(),
                content: content.clone(),
            },
            Node::Directory { children, .. } => Node::Directory {
                name: new_name.into(),
                children: children.clone(),
            },
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::File { name, .. } => write!(f, "{}", name),
            Node::Directory { name, .. } => write!(f, "{}/", name),
        }
    }
}
