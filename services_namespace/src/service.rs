//! Namespace service implementation
//!
//! This module provides the service that owns the tree and implements the
//! filesystem operations on top of the pure rebuilds in [`crate::tree`].

use crate::operations::{FileSystemOperations, FsError, FsResult};
use crate::tree;
use fs_tree::{Node, PathResolver};
use std::sync::Arc;

/// Placeholder content of the seeded `README.md`
pub const README_CONTENT: &str = "Welcome to the PandaGen shell!";

/// The in-memory filesystem
///
/// Owns the root of the tree and the current directory. Each successful
/// mutation swaps in a freshly rebuilt root; a failed one changes nothing.
#[derive(Debug, Clone)]
pub struct FileSystem {
    /// Root directory of the current tree version
    root: Arc<Node>,
    /// Components from the root to the current directory
    current_directory: Vec<String>,
}

impl FileSystem {
    /// Creates a filesystem with the default layout
    ///
    /// The root holds empty `Documents` and `Downloads` directories and a
    /// `README.md` file.
    pub fn new() -> Self {
        let root = Node::directory_with(
            "",
            vec![
                Node::directory("Documents"),
                Node::directory("Downloads"),
                Node::file("README.md", README_CONTENT),
            ],
        );

        Self {
            root: Arc::new(root),
            current_directory: Vec::new(),
        }
    }

    /// Creates a filesystem over an existing tree
    ///
    /// The root must be a directory; its name is cleared.
    pub fn with_root(root: Node) -> FsResult<Self> {
        let root = match root {
            Node::Directory { children, .. } => Node::Directory {
                name: String::new(),
                children,
            },
            Node::File { .. } => {
                return Err(FsError::InvalidOperation(
                    "Root must be a directory".to_string(),
                ))
            }
        };

        Ok(Self {
            root: Arc::new(root),
            current_directory: Vec::new(),
        })
    }

    /// Returns the components of the current directory
    pub fn current_directory(&self) -> &[String] {
        &self.current_directory
    }

    /// Returns the current directory as a path string
    pub fn current_working_directory(&self) -> String {
        PathResolver::render(&self.current_directory)
    }

    /// Returns true if the current directory still names a directory
    ///
    /// It stops doing so when the directory (or an ancestor) is removed or
    /// moved away.
    pub fn current_directory_exists(&self) -> bool {
        tree::lookup(&self.root, &self.current_directory)
            .is_some_and(|node| node.is_directory())
    }

    /// Resolves a path against the current directory
    pub fn resolve_path(&self, path: &str) -> Vec<String> {
        PathResolver::resolve(path, &self.current_directory)
    }

    /// Returns the current tree version
    ///
    /// The snapshot is unaffected by later mutations.
    pub fn snapshot(&self) -> Arc<Node> {
        Arc::clone(&self.root)
    }

    fn commit(&mut self, root: Arc<Node>) {
        self.root = root;
    }

    /// Checks that `parent_path` names an existing directory
    fn require_directory(&self, parent_path: &[String]) -> FsResult<&Arc<Node>> {
        let parent = tree::lookup(&self.root, parent_path)
            .ok_or_else(|| FsError::NotFound(PathResolver::render(parent_path)))?;
        if !parent.is_directory() {
            return Err(FsError::NotADirectory(PathResolver::render(parent_path)));
        }
        Ok(parent)
    }

    fn validate_name(name: &str, path: &str) -> FsResult<()> {
        if PathResolver::is_valid_name(name) {
            Ok(())
        } else {
            Err(FsError::InvalidPath(path.to_string()))
        }
    }
}

impl Default for FileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemOperations for FileSystem {
    fn list(&self, path: Option<&str>) -> FsResult<Vec<String>> {
        let (components, label) = match path.filter(|p| !p.is_empty()) {
            Some(path) => (self.resolve_path(path), path.to_string()),
            None => (
                self.current_directory.clone(),
                self.current_working_directory(),
            ),
        };

        let node = tree::lookup(&self.root, &components)
            .ok_or_else(|| FsError::NotFound(label.clone()))?;

        node.entry_names().ok_or(FsError::NotADirectory(label))
    }

    fn change_directory(&mut self, path: &str) -> FsResult<()> {
        let components = self.resolve_path(path);

        let node = tree::lookup(&self.root, &components)
            .ok_or_else(|| FsError::NotFound(path.to_string()))?;
        if !node.is_directory() {
            return Err(FsError::NotADirectory(path.to_string()));
        }

        self.current_directory = components;
        Ok(())
    }

    fn create_directory(&mut self, path: &str) -> FsResult<()> {
        let components = self.resolve_path(path);
        let (name, parent_path) = components.split_last().ok_or_else(|| {
            FsError::InvalidOperation("Cannot create directory at root".to_string())
        })?;
        Self::validate_name(name, path)?;
        self.require_directory(parent_path)?;

        if tree::lookup(&self.root, &components).is_some() {
            return Err(FsError::AlreadyExists(path.to_string()));
        }

        let new_root = tree::insert_under(&self.root, parent_path, Node::directory(name.as_str()))?;
        self.commit(new_root);
        Ok(())
    }

    fn create_file(&mut self, path: &str, content: &str) -> FsResult<()> {
        let components = self.resolve_path(path);
        let (name, parent_path) = components.split_last().ok_or_else(|| {
            FsError::InvalidOperation("Cannot create file at root".to_string())
        })?;
        Self::validate_name(name, path)?;
        self.require_directory(parent_path)?;

        if let Some(existing) = tree::lookup(&self.root, &components) {
            if existing.is_directory() {
                return Err(FsError::InvalidOperation(
                    "Cannot overwrite directory with file".to_string(),
                ));
            }
        }

        let file = Arc::new(Node::file(name.as_str(), content));
        let new_root = tree::replace_at(&self.root, &components, file).ok_or_else(|| {
            FsError::Unknown(format!(
                "failed to write {}",
                PathResolver::render(&components)
            ))
        })?;
        self.commit(new_root);
        Ok(())
    }

    fn read_file(&self, path: &str) -> FsResult<String> {
        let components = self.resolve_path(path);

        let node = tree::lookup(&self.root, &components)
            .ok_or_else(|| FsError::NotFound(path.to_string()))?;

        node.content()
            .map(str::to_string)
            .ok_or_else(|| FsError::NotAFile(path.to_string()))
    }

    fn remove_node(&mut self, path: &str) -> FsResult<()> {
        let components = self.resolve_path(path);
        if components.is_empty() {
            return Err(FsError::InvalidOperation(
                "Cannot remove root directory".to_string(),
            ));
        }

        if tree::lookup(&self.root, &components).is_none() {
            return Err(FsError::NotFound(path.to_string()));
        }

        let (new_root, _removed) = tree::remove_at(&self.root, &components)?;
        self.commit(new_root);
        Ok(())
    }

    fn move_node(&mut self, source: &str, destination: &str) -> FsResult<()> {
        let source_components = self.resolve_path(source);
        let destination_components = self.resolve_path(destination);

        if source_components.is_empty() {
            return Err(FsError::InvalidOperation(
                "Cannot move root directory".to_string(),
            ));
        }

        let node = tree::lookup(&self.root, &source_components)
            .ok_or_else(|| FsError::NotFound(source.to_string()))?;

        // Work out where the node ends up before touching anything
        let (parent_path, final_name) =
            match tree::lookup(&self.root, &destination_components) {
                Some(existing) if existing.is_directory() => {
                    (destination_components.clone(), node.name().to_string())
                }
                Some(_) => return Err(FsError::AlreadyExists(destination.to_string())),
                None => {
                    // The root always exists, so a missing destination has a last component
                    let (name, parent) = destination_components.split_last().ok_or_else(|| {
                        FsError::Unknown("missing destination resolved to root".to_string())
                    })?;
                    Self::validate_name(name, destination)?;
                    (parent.to_vec(), name.clone())
                }
            };

        let mut target = parent_path.clone();
        target.push(final_name.clone());

        self.require_directory(&parent_path)?;
        if node.is_directory() && target.starts_with(&source_components) {
            return Err(FsError::InvalidOperation(
                "Cannot move a directory into itself".to_string(),
            ));
        }
        if tree::lookup(&self.root, &target).is_some() {
            return Err(FsError::AlreadyExists(PathResolver::render(&target)));
        }

        // Both rebuilds are computed before the root is swapped
        let (without_source, removed) = tree::remove_at(&self.root, &source_components)?;
        let moved = removed.renamed(final_name);
        let new_root = tree::insert_under(&without_source, &parent_path, moved)
            .map_err(|e| FsError::Unknown(format!("move failed after detaching source: {}", e)))?;

        self.commit(new_root);
        Ok(())
    }
}
