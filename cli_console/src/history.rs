//! Command history
//!
//! Keeps executed command lines and a navigation cursor. The session records
//! every command; `previous`/`next` are for hosts with line editing (arrow-key
//! recall), which read the history through `ShellSession::history_mut`.

use std::collections::VecDeque;

/// Command history
///
/// Consecutive duplicates are stored once. The oldest entries are dropped
/// once the limit is reached.
#[derive(Debug, Clone)]
pub struct CommandHistory {
    /// Stored commands, oldest first
    entries: VecDeque<String>,
    /// Navigation position; equals `entries.len()` when not navigating
    cursor: usize,
    /// Maximum number of stored commands
    limit: usize,
}

impl CommandHistory {
    /// Creates an empty history holding at most `limit` commands
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: 0,
            limit,
        }
    }

    /// Records a command and resets the cursor
    pub fn push(&mut self, command: &str) {
        let command = command.trim();
        if !command.is_empty() && self.entries.back().map(String::as_str) != Some(command) {
            self.entries.push_back(command.to_string());

            // Trim to max size
            while self.entries.len() > self.limit {
                self.entries.pop_front();
            }
        }
        self.cursor = self.entries.len();
    }

    /// Steps to the next older command
    ///
    /// Returns `None` when already at the oldest command.
    pub fn previous(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Steps to the next newer command
    ///
    /// Returns `None` when stepping past the newest command; the input line
    /// should then be cleared.
    pub fn next(&mut self) -> Option<&str> {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
            return self.entries.get(self.cursor).map(String::as_str);
        }
        self.cursor = self.entries.len();
        None
    }

    /// Returns all stored commands, oldest first
    pub fn entries(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    /// Returns the number of stored commands
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of stored commands
    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_skips_consecutive_duplicates() {
        let mut history = CommandHistory::new(10);
        history.push("ls");
        history.push("ls");
        history.push("pwd");
        history.push("ls");

        assert_eq!(history.entries(), &["ls", "pwd", "ls"]);
    }

    #[test]
    fn test_push_ignores_blank() {
        let mut history = CommandHistory::new(10);
        history.push("   ");
        assert!(history.is_empty());
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = CommandHistory::new(2);
        history.push("one");
        history.push("two");
        history.push("three");

        assert_eq!(history.len(), 2);
        assert_eq!(history.entries(), &["two", "three"]);
    }

    #[test]
    fn test_limit_keeps_navigation_in_bounds() {
        let mut history = CommandHistory::new(3);
        for command in ["a", "b", "c", "d", "e"] {
            history.push(command);
        }

        assert_eq!(history.limit(), 3);
        assert_eq!(history.entries(), &["c", "d", "e"]);
        assert_eq!(history.previous(), Some("e"));
        assert_eq!(history.previous(), Some("d"));
        assert_eq!(history.previous(), Some("c"));
        assert_eq!(history.previous(), None);
    }

    #[test]
    fn test_navigation() {
        let mut history = CommandHistory::new(10);
        history.push("one");
        history.push("two");
        history.push("three");

        assert_eq!(history.previous(), Some("three"));
        assert_eq!(history.previous(), Some("two"));
        assert_eq!(history.previous(), Some("one"));
        assert_eq!(history.previous(), None);

        assert_eq!(history.next(), Some("two"));
        assert_eq!(history.next(), Some("three"));
        assert_eq!(history.next(), None);

        // Past the newest, going back starts from the newest again
        assert_eq!(history.previous(), Some("three"));
    }

    #[test]
    fn test_push_resets_cursor() {
        let mut history = CommandHistory::new(10);
        history.push("one");
        history.push("two");
        history.previous();
        history.previous();

        history.push("three");
        assert_eq!(history.previous(), Some("three"));
    }

    #[test]
    fn test_empty_navigation() {
        let mut history = CommandHistory::new(10);
        assert_eq!(history.previous(), None);
        assert_eq!(history.next(), None);
    }
}
