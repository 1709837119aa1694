//! # CLI Console
//!
//! Line-oriented shell over the in-memory namespace.
//! It is NOT a POSIX shell: no pipes, no quoting, no variables.
//!
//! ## Responsibilities
//!
//! - Parse one input line into a typed [`ShellCommand`]
//! - Dispatch it to the namespace service
//! - Render results and errors as [`OutputLine`]s for a host to display
//! - Keep the command history and the session transcript
//!
//! The console never writes to stdout itself; rendering is the host's job.

pub mod commands;
pub mod history;
pub mod session;
pub mod settings;

pub use commands::{CommandError, ShellCommand, ShellCommandParser, HELP_TEXT};
pub use history::CommandHistory;
pub use session::{ExecutionResult, LineKind, OutputLine, ShellSession};
pub use settings::{SettingsError, ShellSettings};
