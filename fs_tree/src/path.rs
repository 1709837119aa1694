//! Path resolution logic
//!
//! This module turns path strings into canonical component sequences.
//! Resolution is pure: it never inspects the tree and never fails.

/// Path separator
pub const SEPARATOR: char = '/';

/// Path resolver
///
/// Handles splitting paths into components, folding `.` and `..`, and
/// rendering component sequences back into strings.
pub struct PathResolver;

impl PathResolver {
    /// Splits a path into its non-empty segments
    ///
    /// Repeated and trailing separators are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use fs_tree::PathResolver;
    ///
    /// let segments = PathResolver::split_path("docs//notes/todo.txt/");
    /// assert_eq!(segments, vec!["docs", "notes", "todo.txt"]);
    /// ```
    pub fn split_path(path: &str) -> Vec<&str> {
        path.split(SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .collect()
    }

    /// Returns true if the path starts at the root
    pub fn is_absolute(path: &str) -> bool {
        path.starts_with(SEPARATOR)
    }

    /// Resolves a path against the current directory
    ///
    /// Absolute paths are taken as-is after dropping empty segments.
    /// Relative paths start from `current` and fold each segment: `.` is
    /// skipped, `..` drops the last component (never going above the root),
    /// anything else is appended. An empty path resolves to `current`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fs_tree::PathResolver;
    ///
    /// let cwd = vec!["home".to_string(), "guest".to_string()];
    ///
    /// assert_eq!(PathResolver::resolve("../docs", &cwd), vec!["home", "docs"]);
    /// assert_eq!(PathResolver::resolve("/etc//hosts", &cwd), vec!["etc", "hosts"]);
    /// assert_eq!(PathResolver::resolve("../../../..", &cwd), Vec::<String>::new());
    /// ```
    pub fn resolve(path: &str, current: &[String]) -> Vec<String> {
        let segments = Self::split_path(path);

        if Self::is_absolute(path) {
            return segments.into_iter().map(str::to_string).collect();
        }

        let mut resolved = current.to_vec();
        for segment in segments {
            match segment {
                "." => {}
                ".." => {
                    resolved.pop();
                }
                name => resolved.push(name.to_string()),
            }
        }
        resolved
    }

    /// Renders a component sequence as an absolute path string
    ///
    /// The empty sequence renders as `/`.
    pub fn render(components: &[String]) -> String {
        let mut rendered = String::from(SEPARATOR);
        rendered.push_str(&components.join("/"));
        rendered
    }

    /// Validates a single path component name
    ///
    /// Returns true if the name may be stored as a directory entry.
    pub fn is_valid_name(name: &str) -> bool {
        !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(SEPARATOR)
            && !name.contains('\0')
    }
}
