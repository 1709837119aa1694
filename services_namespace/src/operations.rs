//! Filesystem operations
//!
//! This module defines the operations provided by the namespace service and
//! the errors they report.

use thiserror::Error;

/// Errors that can occur during filesystem operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FsError {
    /// Nothing exists at the path
    #[error("No such file or directory: {0}")]
    NotFound(String),

    /// A directory was required but a file was found
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// A file was required but a directory was found
    #[error("Not a file: {0}")]
    NotAFile(String),

    /// The path cannot name an entry
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// The target name is already taken
    #[error("File or directory already exists: {0}")]
    AlreadyExists(String),

    /// The request is structurally disallowed
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// An internal invariant did not hold
    #[error("An unknown file system error occurred: {0}")]
    Unknown(String),
}

impl FsError {
    /// Returns true for errors that signal a bug rather than a bad request
    pub fn is_internal(&self) -> bool {
        matches!(self, FsError::Unknown(_))
    }
}

/// Result type for filesystem operations
pub type FsResult<T> = Result<T, FsError>;

/// Filesystem operations trait
///
/// Relative paths resolve against the current directory. Every mutating
/// operation either applies completely or leaves the namespace unchanged.
pub trait FileSystemOperations {
    /// List directory contents
    ///
    /// Returns child names in lexicographic order. `None` or an empty path
    /// lists the current directory.
    fn list(&self, path: Option<&str>) -> FsResult<Vec<String>>;

    /// Change the current directory
    fn change_directory(&mut self, path: &str) -> FsResult<()>;

    /// Create an empty directory
    ///
    /// The parent must exist and nothing may exist at the path yet.
    fn create_directory(&mut self, path: &str) -> FsResult<()>;

    /// Create a file, or replace the content of an existing file
    ///
    /// Directories are never overwritten.
    fn create_file(&mut self, path: &str, content: &str) -> FsResult<()>;

    /// Read the content of a file
    fn read_file(&self, path: &str) -> FsResult<String>;

    /// Overwrite a file with new content
    fn write_to_file(&mut self, path: &str, content: &str) -> FsResult<()> {
        self.create_file(path, content)
    }

    /// Remove a file or directory, including everything beneath it
    fn remove_node(&mut self, path: &str) -> FsResult<()>;

    /// Move or rename an entry
    ///
    /// If `destination` is an existing directory the entry moves into it
    /// under its own name. Otherwise the last component of `destination`
    /// becomes the new name inside the destination's parent.
    fn move_node(&mut self, source: &str, destination: &str) -> FsResult<()>;
}
