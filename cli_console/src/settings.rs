//! Shell settings
//!
//! Typed settings with built-in defaults. A settings file only needs the
//! keys it overrides; everything else keeps its default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read the settings file
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse or serialize settings
    #[error("Invalid settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Shell settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellSettings {
    /// Name used in "command not found" messages
    pub shell_name: String,
    /// User shown in the prompt
    pub user: String,
    /// Host name shown in the prompt
    pub hostname: String,
    /// Symbol ending the prompt
    pub prompt_symbol: String,
    /// First line of every session
    pub welcome_message: String,
    /// Maximum number of history entries
    pub history_limit: usize,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            shell_name: "pandash".to_string(),
            user: "guest".to_string(),
            hostname: "pandagen".to_string(),
            prompt_symbol: "$".to_string(),
            welcome_message: "Welcome to the PandaGen shell! Type 'help' for commands."
                .to_string(),
            history_limit: 500,
        }
    }
}

impl ShellSettings {
    /// Parses settings from JSON, filling absent keys with defaults
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serializes settings to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Formats the prompt for a working directory
    pub fn prompt(&self, cwd: &str) -> String {
        format!("{}@{}:{} {} ", self.user, self.hostname, cwd, self.prompt_symbol)
    }
}
