//! Shell session
//!
//! Dispatches parsed commands to the namespace service and turns the results
//! into output lines.

use crate::commands::{CommandError, ShellCommand, ShellCommandParser, HELP_TEXT};
use crate::history::CommandHistory;
use crate::settings::ShellSettings;
use log::{debug, error};
use services_namespace::{FileSystem, FileSystemOperations, FsError};

/// Kind of an output line, so hosts can style them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Echo of an executed command, prefixed with the prompt
    Prompt,
    /// Regular command output
    Output,
    /// Error message
    Error,
    /// Informational text (banner, help)
    Info,
}

/// A rendered output line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    /// Line kind
    pub kind: LineKind,
    /// Line text
    pub text: String,
}

impl OutputLine {
    /// Creates a new output line
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Creates a regular output line
    pub fn output(text: impl Into<String>) -> Self {
        Self::new(LineKind::Output, text)
    }

    /// Creates an error line
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(LineKind::Error, text)
    }

    /// Creates an informational line
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(LineKind::Info, text)
    }
}

/// Result of executing one input line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Lines produced by the command, starting with the prompt echo
    pub lines: Vec<OutputLine>,
    /// Whether the host should clear its screen
    pub clear_screen: bool,
}

/// A shell session
///
/// Owns a filesystem, the command history and the transcript of everything
/// shown so far.
pub struct ShellSession {
    /// The namespace this session operates on
    fs: FileSystem,
    /// Session settings
    settings: ShellSettings,
    /// Executed commands
    history: CommandHistory,
    /// Every line produced since the last `clear`
    transcript: Vec<OutputLine>,
}

impl ShellSession {
    /// Creates a session over a freshly seeded filesystem
    pub fn new(settings: ShellSettings) -> Self {
        Self::with_filesystem(FileSystem::new(), settings)
    }

    /// Creates a session over an existing filesystem
    pub fn with_filesystem(fs: FileSystem, settings: ShellSettings) -> Self {
        let history = CommandHistory::new(settings.history_limit);
        let transcript = vec![OutputLine::info(settings.welcome_message.clone())];

        Self {
            fs,
            settings,
            history,
            transcript,
        }
    }

    /// Returns the prompt for the current directory
    pub fn prompt(&self) -> String {
        self.settings.prompt(&self.fs.current_working_directory())
    }

    /// Returns the filesystem
    pub fn filesystem(&self) -> &FileSystem {
        &self.fs
    }

    /// Returns the settings
    pub fn settings(&self) -> &ShellSettings {
        &self.settings
    }

    /// Returns the command history
    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Returns the command history for arrow-key recall in line-editing hosts
    pub fn history_mut(&mut self) -> &mut CommandHistory {
        &mut self.history
    }

    /// Returns every line shown since the last `clear`
    pub fn transcript(&self) -> &[OutputLine] {
        &self.transcript
    }

    /// Executes one input line
    ///
    /// Blank input does nothing. Otherwise the line is echoed behind the
    /// prompt, recorded in history and dispatched.
    pub fn execute(&mut self, input: &str) -> ExecutionResult {
        let input = input.trim();
        if input.is_empty() {
            return ExecutionResult::default();
        }

        let mut lines = vec![OutputLine::new(
            LineKind::Prompt,
            format!("{}{}", self.prompt(), input),
        )];
        self.history.push(input);

        let clear_screen = match ShellCommandParser::parse(input) {
            Ok(ShellCommand::Clear) => true,
            Ok(command) => {
                debug!("dispatching {:?}", command);
                self.dispatch(command, &mut lines);
                false
            }
            Err(e) => {
                lines.push(self.render_command_error(&e));
                false
            }
        };

        if clear_screen {
            self.transcript.clear();
            return ExecutionResult {
                lines: Vec::new(),
                clear_screen,
            };
        }

        self.transcript.extend(lines.iter().cloned());
        ExecutionResult {
            lines,
            clear_screen,
        }
    }

    fn dispatch(&mut self, command: ShellCommand, lines: &mut Vec<OutputLine>) {
        let result = match command {
            ShellCommand::List { path } => self.fs.list(path.as_deref()).map(|items| {
                if !items.is_empty() {
                    lines.push(OutputLine::output(items.join("\t")));
                }
            }),
            ShellCommand::ChangeDirectory { path } => {
                self.fs.change_directory(path.as_deref().unwrap_or("/"))
            }
            ShellCommand::PrintWorkingDirectory => {
                lines.push(OutputLine::output(self.fs.current_working_directory()));
                Ok(())
            }
            ShellCommand::Echo { text } => {
                lines.push(OutputLine::output(text));
                Ok(())
            }
            ShellCommand::EchoRedirect { text, path } => self.fs.write_to_file(&path, &text),
            ShellCommand::Cat { path } => self
                .fs
                .read_file(&path)
                .map(|content| lines.push(OutputLine::output(content))),
            ShellCommand::MakeDirectory { path } => self.fs.create_directory(&path),
            ShellCommand::Touch { path } => self.fs.create_file(&path, ""),
            ShellCommand::Remove { path } => {
                if let Some(message) = self.protected_removal(&path) {
                    lines.push(OutputLine::error(message));
                    return;
                }
                self.fs.remove_node(&path)
            }
            ShellCommand::Move {
                source,
                destination,
            } => {
                if source == "/" {
                    lines.push(OutputLine::error("Error: Cannot move root directory."));
                    return;
                }
                self.fs.move_node(&source, &destination)
            }
            ShellCommand::History => {
                for (index, entry) in self.history.entries().into_iter().enumerate() {
                    lines.push(OutputLine::output(format!("{:>5}  {}", index + 1, entry)));
                }
                Ok(())
            }
            ShellCommand::Help => {
                lines.extend(HELP_TEXT.lines().map(OutputLine::info));
                Ok(())
            }
            // Handled by `execute`
            ShellCommand::Clear => Ok(()),
        };

        if let Err(e) = result {
            lines.push(Self::render_fs_error(&e));
        }
    }

    /// Refuses to remove the root or the current directory
    fn protected_removal(&self, path: &str) -> Option<String> {
        let target = self.fs.resolve_path(path);

        if matches!(path, "/" | "." | "..") || target.is_empty() {
            return Some(format!(
                "Error: Cannot remove '{}': Invalid argument or protected path.",
                path
            ));
        }
        if target == self.fs.current_directory() {
            return Some("Error: Cannot remove current directory '.'".to_string());
        }
        None
    }

    fn render_fs_error(e: &FsError) -> OutputLine {
        if e.is_internal() {
            error!("internal filesystem error: {}", e);
        }
        OutputLine::error(format!("Error: {}", e))
    }

    fn render_command_error(&self, e: &CommandError) -> OutputLine {
        match e {
            CommandError::UnknownCommand(_) => {
                OutputLine::error(format!("{}: {}", self.settings.shell_name, e))
            }
            CommandError::Usage(_) => OutputLine::error(e.to_string()),
            CommandError::MissingRedirectTarget | CommandError::Empty => {
                OutputLine::error(format!("Error: {}", e))
            }
        }
    }
}

impl Default for ShellSession {
    fn default() -> Self {
        Self::new(ShellSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Output lines after the prompt echo
    fn run(session: &mut ShellSession, input: &str) -> Vec<OutputLine> {
        session.execute(input).lines.into_iter().skip(1).collect()
    }

    fn texts(lines: &[OutputLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_session_starts_with_banner() {
        let session = ShellSession::default();
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].kind, LineKind::Info);
    }

    #[test]
    fn test_blank_input_does_nothing() {
        let mut session = ShellSession::default();
        let result = session.execute("   ");
        assert!(result.lines.is_empty());
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_prompt_echo() {
        let mut session = ShellSession::default();
        let result = session.execute("pwd");
        assert_eq!(result.lines[0].kind, LineKind::Prompt);
        assert_eq!(result.lines[0].text, "guest@pandagen:/ $ pwd");
    }

    #[test]
    fn test_ls_joins_with_tabs() {
        let mut session = ShellSession::default();
        let lines = run(&mut session, "ls");
        assert_eq!(texts(&lines), vec!["Documents\tDownloads\tREADME.md"]);
    }

    #[test]
    fn test_ls_empty_directory_prints_nothing() {
        let mut session = ShellSession::default();
        assert!(run(&mut session, "ls Documents").is_empty());
    }

    #[test]
    fn test_cd_and_pwd() {
        let mut session = ShellSession::default();
        run(&mut session, "cd Documents");
        assert_eq!(texts(&run(&mut session, "pwd")), vec!["/Documents"]);
        assert_eq!(session.prompt(), "guest@pandagen:/Documents $ ");

        run(&mut session, "cd");
        assert_eq!(texts(&run(&mut session, "pwd")), vec!["/"]);
    }

    #[test]
    fn test_echo_redirect_and_cat() {
        let mut session = ShellSession::default();
        assert!(run(&mut session, "echo hello there > notes.txt").is_empty());
        assert_eq!(texts(&run(&mut session, "cat notes.txt")), vec!["hello there"]);

        run(&mut session, "echo replaced > notes.txt");
        assert_eq!(texts(&run(&mut session, "cat notes.txt")), vec!["replaced"]);
    }

    #[test]
    fn test_echo_plain() {
        let mut session = ShellSession::default();
        assert_eq!(texts(&run(&mut session, "echo hi")), vec!["hi"]);
    }

    #[test]
    fn test_mkdir_touch_rm_mv() {
        let mut session = ShellSession::default();
        run(&mut session, "mkdir projects");
        run(&mut session, "touch projects/todo.txt");
        run(&mut session, "mv projects/todo.txt Documents");
        run(&mut session, "rm projects");

        assert_eq!(
            texts(&run(&mut session, "ls")),
            vec!["Documents\tDownloads\tREADME.md"]
        );
        assert_eq!(texts(&run(&mut session, "ls Documents")), vec!["todo.txt"]);
    }

    #[test]
    fn test_fs_errors_rendered() {
        let mut session = ShellSession::default();
        let lines = run(&mut session, "cat missing.txt");
        assert_eq!(lines[0].kind, LineKind::Error);
        assert_eq!(lines[0].text, "Error: No such file or directory: missing.txt");

        let lines = run(&mut session, "cd README.md");
        assert_eq!(texts(&lines), vec!["Error: Not a directory: README.md"]);

        let lines = run(&mut session, "mkdir Documents");
        assert_eq!(
            texts(&lines),
            vec!["Error: File or directory already exists: Documents"]
        );
    }

    #[test]
    fn test_unknown_command() {
        let mut session = ShellSession::default();
        let lines = run(&mut session, "frob");
        assert_eq!(texts(&lines), vec!["pandash: command not found: frob"]);
    }

    #[test]
    fn test_usage_and_redirect_errors() {
        let mut session = ShellSession::default();
        assert_eq!(texts(&run(&mut session, "cat")), vec!["Usage: cat <filename>"]);
        assert_eq!(
            texts(&run(&mut session, "echo x >")),
            vec!["Error: Missing filename for redirection."]
        );
    }

    #[test]
    fn test_rm_protected_paths() {
        let mut session = ShellSession::default();
        for path in ["/", ".", "..", "Documents/.."] {
            let lines = run(&mut session, &format!("rm {}", path));
            assert_eq!(lines[0].kind, LineKind::Error);
            assert!(lines[0].text.contains("protected path"));
        }

        run(&mut session, "cd Documents");
        let lines = run(&mut session, "rm /Documents");
        assert_eq!(texts(&lines), vec!["Error: Cannot remove current directory '.'"]);
        assert!(session.filesystem().current_directory_exists());
    }

    #[test]
    fn test_mv_root_refused() {
        let mut session = ShellSession::default();
        let lines = run(&mut session, "mv / /x");
        assert_eq!(texts(&lines), vec!["Error: Cannot move root directory."]);
    }

    #[test]
    fn test_history_command() {
        let mut session = ShellSession::default();
        run(&mut session, "pwd");
        run(&mut session, "ls");
        let lines = run(&mut session, "history");
        assert_eq!(
            texts(&lines),
            vec!["    1  pwd", "    2  ls", "    3  history"]
        );
        assert_eq!(session.history_mut().previous(), Some("history"));
    }

    #[test]
    fn test_history_limit_from_settings() {
        let settings = ShellSettings {
            history_limit: 2,
            ..ShellSettings::default()
        };
        let mut session = ShellSession::new(settings);
        run(&mut session, "pwd");
        run(&mut session, "ls");
        run(&mut session, "echo hi");

        assert_eq!(session.history().limit(), 2);
        assert_eq!(session.history().entries(), &["ls", "echo hi"]);
        assert_eq!(session.history_mut().previous(), Some("echo hi"));
        assert_eq!(session.history_mut().previous(), Some("ls"));
        assert_eq!(session.history_mut().previous(), None);
    }

    #[test]
    fn test_clear_resets_transcript() {
        let mut session = ShellSession::default();
        run(&mut session, "ls");
        assert!(session.transcript().len() > 1);

        let result = session.execute("clear");
        assert!(result.clear_screen);
        assert!(result.lines.is_empty());
        assert!(session.transcript().is_empty());
        assert_eq!(session.history().entries(), &["ls", "clear"]);
    }

    #[test]
    fn test_help_lines_are_info() {
        let mut session = ShellSession::default();
        let lines = run(&mut session, "help");
        assert!(lines.len() > 5);
        assert!(lines.iter().all(|l| l.kind == LineKind::Info));
    }

    #[test]
    fn test_transcript_accumulates() {
        let mut session = ShellSession::default();
        run(&mut session, "pwd");
        // banner + prompt echo + output
        assert_eq!(session.transcript().len(), 3);
    }

    #[test]
    fn test_settings_shape_prompt() {
        let settings = ShellSettings {
            user: "root".to_string(),
            hostname: "box".to_string(),
            prompt_symbol: "#".to_string(),
            ..ShellSettings::default()
        };
        let session = ShellSession::new(settings);
        assert_eq!(session.prompt(), "root@box:/ # ");
        assert_eq!(session.settings().hostname, "box");
    }
}
