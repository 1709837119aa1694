//! # Filesystem Tree
//!
//! This crate provides the node model and path resolution for the in-memory
//! namespace.
//!
//! ## Philosophy
//!
//! - **Nodes are values**: A tree version is never mutated in place
//! - **Paths are sequences**: Resolution is pure string work and never looks at the tree
//! - **Sharing is structural**: Directories hold their children behind `Arc`, so a
//!   rebuilt ancestor reuses every subtree it did not touch
//!
//! ## Design
//!
//! - A `Node` is either a file (name + text content) or a directory (name + children)
//! - The root is a directory with an empty name
//! - Existence and type checks belong to the namespace engine, not to this crate

pub mod node;
pub mod path;

pub use node::{Children, Node, NodeKind};
pub use path::PathResolver;
