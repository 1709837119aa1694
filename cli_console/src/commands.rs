//! # Shell Commands
//!
//! Parses input lines into typed commands.
//!
//! ## Command Set
//!
//! - `ls [path]` - List directory contents
//! - `cd [path]` - Change directory (no argument means `/`)
//! - `pwd` - Print the current directory
//! - `echo <text>` / `echo <text> > <file>` - Print text or write it to a file
//! - `cat <file>` - Print file content
//! - `mkdir <dir>` - Create a directory
//! - `touch <file>` - Create an empty file
//! - `rm <path>` - Remove a file or directory
//! - `mv <source> <dest>` - Move or rename
//! - `history` - Show command history
//! - `clear` - Clear the screen
//! - `help` - Show the command summary

use thiserror::Error;

/// Command summary printed by `help`
pub const HELP_TEXT: &str = "\
Basic Commands:
  ls [path]            List directory contents
  cd <directory>       Change directory
  pwd                  Print working directory name
  echo <text>          Display text
  echo <text> > <file> Write text to file (overwrite)
  cat <file>           Display file content
  mkdir <directory>    Create a directory
  touch <file>         Create an empty file
  rm <path>            Remove file or directory
  mv <source> <dest>   Move/rename file or directory
  history              Show command history
  clear                Clear the terminal screen
  help                 Show this help message";

/// Command parse errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("command not found: {0}")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Missing filename for redirection.")]
    MissingRedirectTarget,
}

/// Shell commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// List a directory (current directory when no path)
    List { path: Option<String> },

    /// Change directory (root when no path)
    ChangeDirectory { path: Option<String> },

    /// Print the current directory
    PrintWorkingDirectory,

    /// Print text
    Echo { text: String },

    /// Write text to a file, replacing its content
    EchoRedirect { text: String, path: String },

    /// Print file content
    Cat { path: String },

    /// Create a directory
    MakeDirectory { path: String },

    /// Create an empty file
    Touch { path: String },

    /// Remove a file or directory
    Remove { path: String },

    /// Move or rename
    Move { source: String, destination: String },

    /// Show command history
    History,

    /// Clear the screen
    Clear,

    /// Show help
    Help,
}

/// Shell command parser
pub struct ShellCommandParser;

impl ShellCommandParser {
    /// Parses a command line
    ///
    /// The first word is the verb (case-insensitive); the trimmed rest of the
    /// line is its argument string.
    pub fn parse(input: &str) -> Result<ShellCommand, CommandError> {
        let input = input.trim();

        if input.is_empty() {
            return Err(CommandError::Empty);
        }

        let (verb, arguments) = match input.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (input, ""),
        };

        match verb.to_lowercase().as_str() {
            "ls" => Ok(ShellCommand::List {
                path: Self::optional(arguments),
            }),
            "cd" => Ok(ShellCommand::ChangeDirectory {
                path: Self::optional(arguments),
            }),
            "pwd" => Ok(ShellCommand::PrintWorkingDirectory),
            "echo" => Self::parse_echo(arguments),
            "cat" => Ok(ShellCommand::Cat {
                path: Self::required(arguments, "cat <filename>")?,
            }),
            "mkdir" => Ok(ShellCommand::MakeDirectory {
                path: Self::required(arguments, "mkdir <directory_name>")?,
            }),
            "touch" => Ok(ShellCommand::Touch {
                path: Self::required(arguments, "touch <filename>")?,
            }),
            "rm" => Ok(ShellCommand::Remove {
                path: Self::required(arguments, "rm <file_or_directory>")?,
            }),
            "mv" => Self::parse_move(arguments),
            "history" => Ok(ShellCommand::History),
            "clear" => Ok(ShellCommand::Clear),
            "help" => Ok(ShellCommand::Help),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }

    fn optional(arguments: &str) -> Option<String> {
        if arguments.is_empty() {
            None
        } else {
            Some(arguments.to_string())
        }
    }

    fn required(arguments: &str, usage: &'static str) -> Result<String, CommandError> {
        Self::optional(arguments).ok_or(CommandError::Usage(usage))
    }

    /// Parses `echo`, splitting at the first `>` for redirection
    fn parse_echo(arguments: &str) -> Result<ShellCommand, CommandError> {
        match arguments.split_once('>') {
            Some((text, path)) => {
                let path = path.trim();
                if path.is_empty() {
                    return Err(CommandError::MissingRedirectTarget);
                }
                Ok(ShellCommand::EchoRedirect {
                    text: text.trim().to_string(),
                    path: path.to_string(),
                })
            }
            None => Ok(ShellCommand::Echo {
                text: arguments.to_string(),
            }),
        }
    }

    /// Parses `mv <source> <destination>`
    fn parse_move(arguments: &str) -> Result<ShellCommand, CommandError> {
        const USAGE: &str = "mv <source> <destination>";

        let (source, destination) = arguments
            .split_once(char::is_whitespace)
            .ok_or(CommandError::Usage(USAGE))?;
        let (source, destination) = (source.trim(), destination.trim());

        if source.is_empty() || destination.is_empty() {
            return Err(CommandError::Usage(USAGE));
        }

        Ok(ShellCommand::Move {
            source: source.to_string(),
            destination: destination.to_string(),
        })
    }
}
