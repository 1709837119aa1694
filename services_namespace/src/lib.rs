//! # Namespace Service
//!
//! This service owns an in-memory directory tree and provides filesystem-like
//! operations over it.
//!
//! ## Philosophy
//!
//! - The tree is rebuilt copy-on-write along the mutated path, never edited in place
//! - A failed operation leaves the tree and the current directory untouched
//! - The current directory is a path, not a reference into the tree
//! - Errors are values; the service never prints or logs
//!
//! ## Operations
//!
//! - `list(path)`: List directory contents
//! - `change_directory(path)`: Set the current directory
//! - `create_directory(path)`: Create an empty directory
//! - `create_file(path, content)`: Create or overwrite a file
//! - `read_file(path)`: Read file content
//! - `write_to_file(path, content)`: Overwrite a file
//! - `remove_node(path)`: Remove a file or directory
//! - `move_node(source, destination)`: Move or rename an entry

pub mod operations;
pub mod service;
pub mod tree;

pub use operations::{FileSystemOperations, FsError, FsResult};
pub use service::{FileSystem, README_CONTENT};
