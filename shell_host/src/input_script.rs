//! # Command Script Parser
//!
//! Provides a scripted input format for deterministic runs and demos.
//!
//! ## Format
//!
//! Scripts are line-based, each line being one shell command:
//! - Blank lines are skipped
//! - Lines starting with `#` are comments
//!
//! ## Example
//!
//! ```text
//! # Lay out a project
//! mkdir projects
//! echo first draft > projects/draft.txt
//! cat projects/draft.txt
//! ```

use std::collections::VecDeque;
use thiserror::Error;

/// Command script error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandScriptError {
    #[error("Empty script")]
    EmptyScript,
}

/// Command script
///
/// Holds the commands of a script in execution order.
#[derive(Debug, Clone)]
pub struct CommandScript {
    commands: VecDeque<String>,
}

impl CommandScript {
    /// Parses a script from text
    pub fn from_text(text: &str) -> Result<Self, CommandScriptError> {
        let commands: VecDeque<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();

        if commands.is_empty() {
            return Err(CommandScriptError::EmptyScript);
        }

        Ok(Self { commands })
    }

    /// Takes the next command
    pub fn next_command(&mut self) -> Option<String> {
        self.commands.pop_front()
    }

    /// Returns true if commands remain
    pub fn has_more(&self) -> bool {
        !self.commands.is_empty()
    }

    /// Returns the number of remaining commands
    pub fn remaining(&self) -> usize {
        self.commands.len()
    }
}
