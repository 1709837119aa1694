//! Tree lookup and copy-on-write rebuilds
//!
//! Every function here is pure: it takes a root and returns a new root,
//! leaving the input untouched. Only directories on the path from the root to
//! the target are rebuilt; every other subtree is shared with the old root.

use crate::operations::{FsError, FsResult};
use fs_tree::{Children, Node, PathResolver};
use std::sync::Arc;

/// Finds the node at a component sequence
///
/// The empty sequence is the root. Descending through a file fails.
pub fn lookup<'a>(root: &'a Arc<Node>, components: &[String]) -> Option<&'a Arc<Node>> {
    components
        .iter()
        .try_fold(root, |node, component| node.child(component))
}

/// Finds the parent directory of a component sequence
///
/// Returns the parent and the final component name. Fails for the empty
/// sequence and when the parent is missing or not a directory.
pub fn lookup_parent<'a, 'p>(
    root: &'a Arc<Node>,
    components: &'p [String],
) -> Option<(&'a Arc<Node>, &'p str)> {
    let (name, parent_path) = components.split_last()?;
    let parent = lookup(root, parent_path)?;
    if !parent.is_directory() {
        return None;
    }
    Some((parent, name.as_str()))
}

/// Rebuilds a directory with new children, keeping its name
fn rebuild_directory(directory: &Node, children: Children) -> Arc<Node> {
    Arc::new(Node::Directory {
        name: directory.name().to_string(),
        children,
    })
}

/// Replaces the node at `path`, rebuilding each ancestor
///
/// The final component is spliced into its parent whether or not it already
/// exists there. Returns `None` if an intermediate component is missing or is
/// not a directory. An empty path yields `replacement` itself.
pub fn replace_at(node: &Arc<Node>, path: &[String], replacement: Arc<Node>) -> Option<Arc<Node>> {
    let Some((component, rest)) = path.split_first() else {
        return Some(replacement);
    };

    let children = node.children()?;
    let updated = if rest.is_empty() {
        replacement
    } else {
        replace_at(children.get(component)?, rest, replacement)?
    };

    let mut children = children.clone();
    children.insert(component.clone(), updated);
    Some(rebuild_directory(node, children))
}

/// Inserts a node into the directory at `parent_path`
///
/// Fails if the parent is missing, is not a directory, or already has an
/// entry with the node's name.
pub fn insert_under(root: &Arc<Node>, parent_path: &[String], node: Node) -> FsResult<Arc<Node>> {
    let parent = lookup(root, parent_path)
        .ok_or_else(|| FsError::NotFound(PathResolver::render(parent_path)))?;
    let children = parent
        .children()
        .ok_or_else(|| FsError::NotADirectory(PathResolver::render(parent_path)))?;

    if children.contains_key(node.name()) {
        let mut target = parent_path.to_vec();
        target.push(node.name().to_string());
        return Err(FsError::AlreadyExists(PathResolver::render(&target)));
    }

    let mut children = children.clone();
    children.insert(node.name().to_string(), Arc::new(node));
    let updated = rebuild_directory(parent, children);

    replace_at(root, parent_path, updated).ok_or_else(|| {
        FsError::Unknown(format!(
            "failed to rebuild ancestors of {}",
            PathResolver::render(parent_path)
        ))
    })
}

/// Removes the node at `path`
///
/// Returns the new root together with the removed subtree.
pub fn remove_at(root: &Arc<Node>, path: &[String]) -> FsResult<(Arc<Node>, Arc<Node>)> {
    if path.is_empty() {
        return Err(FsError::InvalidOperation(
            "Cannot remove root directory".to_string(),
        ));
    }

    let (parent, name) = lookup_parent(root, path)
        .ok_or_else(|| FsError::NotFound(PathResolver::render(path)))?;
    let mut children = parent
        .children()
        .cloned()
        .ok_or_else(|| FsError::Unknown("parent lookup returned a file".to_string()))?;
    let removed = children
        .remove(name)
        .ok_or_else(|| FsError::NotFound(PathResolver::render(path)))?;

    let parent_path = &path[..path.len() - 1];
    let updated = rebuild_directory(parent, children);
    let new_root = replace_at(root, parent_path, updated).ok_or_else(|| {
        FsError::Unknown(format!(
            "failed to rebuild ancestors of {}",
            PathResolver::render(parent_path)
        ))
    })?;

    Ok((new_root, removed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    /// `/a/b/f.txt`, `/a/g.txt`, `/c/d/h.txt`
    fn sample_root() -> Arc<Node> {
        Arc::new(Node::directory_with(
            "",
            vec![
                Node::directory_with(
                    "a",
                    vec![
                        Node::directory_with("b", vec![Node::file("f.txt", "f")]),
                        Node::file("g.txt", "g"),
                    ],
                ),
                Node::directory_with(
                    "c",
                    vec![Node::directory_with("d", vec![Node::file("h.txt", "h")])],
                ),
            ],
        ))
    }

    #[test]
    fn test_lookup_empty_is_root() {
        let root = sample_root();
        let found = lookup(&root, &[]).unwrap();
        assert!(Arc::ptr_eq(found, &root));
    }

    #[test]
    fn test_lookup_nested() {
        let root = sample_root();
        let found = lookup(&root, &path(&["a", "b", "f.txt"])).unwrap();
        assert_eq!(found.content(), Some("f"));
    }

    #[test]
    fn test_lookup_missing() {
        let root = sample_root();
        assert!(lookup(&root, &path(&["a", "missing"])).is_none());
    }

    #[test]
    fn test_lookup_through_file_fails() {
        let root = sample_root();
        assert!(lookup(&root, &path(&["a", "g.txt", "x"])).is_none());
    }

    #[test]
    fn test_lookup_parent() {
        let root = sample_root();
        let components = path(&["a", "b", "new.txt"]);
        let (parent, name) = lookup_parent(&root, &components).unwrap();
        assert_eq!(parent.name(), "b");
        assert_eq!(name, "new.txt");
    }

    #[test]
    fn test_lookup_parent_failures() {
        let root = sample_root();
        assert!(lookup_parent(&root, &[]).is_none());
        assert!(lookup_parent(&root, &path(&["missing", "x"])).is_none());
        assert!(lookup_parent(&root, &path(&["a", "g.txt", "x"])).is_none());
    }

    #[test]
    fn test_replace_at_shares_siblings() {
        let root = sample_root();
        let new_root = replace_at(
            &root,
            &path(&["a", "b", "f.txt"]),
            Arc::new(Node::file("f.txt", "changed")),
        )
        .unwrap();

        let changed = lookup(&new_root, &path(&["a", "b", "f.txt"])).unwrap();
        assert_eq!(changed.content(), Some("changed"));

        // Untouched subtrees are the same allocation
        let old_c = lookup(&root, &path(&["c"])).unwrap();
        let new_c = lookup(&new_root, &path(&["c"])).unwrap();
        assert!(Arc::ptr_eq(old_c, new_c));

        let old_g = lookup(&root, &path(&["a", "g.txt"])).unwrap();
        let new_g = lookup(&new_root, &path(&["a", "g.txt"])).unwrap();
        assert!(Arc::ptr_eq(old_g, new_g));

        // The old root still shows the old content
        let original = lookup(&root, &path(&["a", "b", "f.txt"])).unwrap();
        assert_eq!(original.content(), Some("f"));
    }

    #[test]
    fn test_replace_at_keeps_ancestor_names() {
        let root = sample_root();
        let new_root = replace_at(
            &root,
            &path(&["a", "b", "x.txt"]),
            Arc::new(Node::file("x.txt", "")),
        )
        .unwrap();

        assert_eq!(new_root.name(), "");
        assert_eq!(lookup(&new_root, &path(&["a"])).unwrap().name(), "a");
        assert_eq!(lookup(&new_root, &path(&["a", "b"])).unwrap().name(), "b");
    }

    #[test]
    fn test_replace_at_missing_intermediate() {
        let root = sample_root();
        let result = replace_at(
            &root,
            &path(&["missing", "x.txt"]),
            Arc::new(Node::file("x.txt", "")),
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_replace_at_through_file() {
        let root = sample_root();
        let result = replace_at(
            &root,
            &path(&["a", "g.txt", "x.txt"]),
            Arc::new(Node::file("x.txt", "")),
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_insert_under_root() {
        let root = sample_root();
        let new_root = insert_under(&root, &[], Node::directory("e")).unwrap();
        assert!(lookup(&new_root, &path(&["e"])).unwrap().is_directory());
        assert!(lookup(&root, &path(&["e"])).is_none());
    }

    #[test]
    fn test_insert_under_nested() {
        let root = sample_root();
        let new_root = insert_under(&root, &path(&["c", "d"]), Node::file("i.txt", "i")).unwrap();
        let inserted = lookup(&new_root, &path(&["c", "d", "i.txt"])).unwrap();
        assert_eq!(inserted.content(), Some("i"));
        assert!(lookup(&new_root, &path(&["c", "d", "h.txt"])).is_some());
    }

    #[test]
    fn test_insert_under_existing_name() {
        let root = sample_root();
        let result = insert_under(&root, &path(&["a"]), Node::file("g.txt", ""));
        assert_eq!(result, Err(FsError::AlreadyExists("/a/g.txt".to_string())));
    }

    #[test]
    fn test_insert_under_missing_parent() {
        let root = sample_root();
        let result = insert_under(&root, &path(&["nope"]), Node::file("x", ""));
        assert_eq!(result, Err(FsError::NotFound("/nope".to_string())));
    }

    #[test]
    fn test_insert_under_file_parent() {
        let root = sample_root();
        let result = insert_under(&root, &path(&["a", "g.txt"]), Node::file("x", ""));
        assert_eq!(result, Err(FsError::NotADirectory("/a/g.txt".to_string())));
    }

    #[test]
    fn test_remove_at() {
        let root = sample_root();
        let (new_root, removed) = remove_at(&root, &path(&["a", "b"])).unwrap();

        assert_eq!(removed.name(), "b");
        assert!(lookup(&new_root, &path(&["a", "b"])).is_none());
        assert!(lookup(&new_root, &path(&["a", "g.txt"])).is_some());
        assert!(lookup(&root, &path(&["a", "b", "f.txt"])).is_some());

        let old_c = lookup(&root, &path(&["c"])).unwrap();
        let new_c = lookup(&new_root, &path(&["c"])).unwrap();
        assert!(Arc::ptr_eq(old_c, new_c));
    }

    #[test]
    fn test_remove_at_top_level() {
        let root = sample_root();
        let (new_root, _) = remove_at(&root, &path(&["c"])).unwrap();
        assert_eq!(new_root.entry_names().unwrap(), vec!["a"]);
    }

    #[test]
    fn test_remove_at_root_rejected() {
        let root = sample_root();
        assert!(matches!(
            remove_at(&root, &[]),
            Err(FsError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_remove_at_missing() {
        let root = sample_root();
        assert_eq!(
            remove_at(&root, &path(&["a", "nope"])).map(|_| ()),
            Err(FsError::NotFound("/a/nope".to_string()))
        );
    }
}
