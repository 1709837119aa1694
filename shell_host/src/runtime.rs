//! # Host Runtime
//!
//! The read-execute-render loop that drives a shell session.

use crate::input_script::{CommandScript, CommandScriptError};
use cli_console::{ExecutionResult, LineKind, OutputLine, ShellSession, ShellSettings};
use log::{debug, info, warn};
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Escape sequence that clears the screen and homes the cursor
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

/// Host runtime error types
#[derive(Debug, Error)]
pub enum HostRuntimeError {
    #[error("Script error: {0}")]
    ScriptError(#[from] CommandScriptError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Host mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMode {
    /// Commands are read from the input stream
    Interactive,
    /// Commands come from a script
    Scripted,
}

/// Host runtime configuration
#[derive(Debug, Clone)]
pub struct HostRuntimeConfig {
    /// Optional command script; runs in scripted mode when present
    pub script: Option<String>,
    /// Session settings
    pub settings: ShellSettings,
    /// Suppress the welcome banner
    pub quiet: bool,
}

impl Default for HostRuntimeConfig {
    fn default() -> Self {
        Self {
            script: None,
            settings: ShellSettings::default(),
            quiet: false,
        }
    }
}

/// Host runtime
pub struct HostRuntime {
    /// The shell session being driven
    session: ShellSession,
    /// Command script (scripted mode only)
    script: Option<CommandScript>,
    /// Whether to print the welcome banner
    quiet: bool,
    /// Number of commands executed
    steps: usize,
}

impl HostRuntime {
    /// Creates a new host runtime
    pub fn new(config: HostRuntimeConfig) -> Result<Self, HostRuntimeError> {
        let script = config
            .script
            .as_deref()
            .map(CommandScript::from_text)
            .transpose()?;

        Ok(Self {
            session: ShellSession::new(config.settings),
            script,
            quiet: config.quiet,
            steps: 0,
        })
    }

    /// Returns the host mode
    pub fn mode(&self) -> HostMode {
        if self.script.is_some() {
            HostMode::Scripted
        } else {
            HostMode::Interactive
        }
    }

    /// Returns the session
    pub fn session(&self) -> &ShellSession {
        &self.session
    }

    /// Returns the number of commands executed so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Runs against stdin and stdout
    pub fn run(&mut self) -> Result<(), HostRuntimeError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), &mut stdout.lock())
    }

    /// Runs against the given streams
    ///
    /// In scripted mode `input` is not read.
    pub fn run_with<R: BufRead, W: Write>(
        &mut self,
        input: R,
        output: &mut W,
    ) -> Result<(), HostRuntimeError> {
        info!("starting shell session in {:?} mode", self.mode());

        if !self.quiet {
            for line in self.session.transcript() {
                writeln!(output, "{}", line.text)?;
            }
        }

        match self.script.take() {
            Some(script) => self.run_script(script, output)?,
            None => self.run_interactive(input, output)?,
        }

        output.flush()?;
        info!("shell session finished after {} commands", self.steps);
        Ok(())
    }

    fn run_script<W: Write>(
        &mut self,
        mut script: CommandScript,
        output: &mut W,
    ) -> Result<(), HostRuntimeError> {
        while let Some(command) = script.next_command() {
            debug!("script step {}: {}", self.steps + 1, command);
            if Self::is_exit(&command) {
                break;
            }
            let result = self.step(&command);
            Self::render(&result, output, true)?;
        }
        Ok(())
    }

    fn run_interactive<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        output: &mut W,
    ) -> Result<(), HostRuntimeError> {
        let mut buffer = Vec::new();
        loop {
            write!(output, "{}", self.session.prompt())?;
            output.flush()?;

            buffer.clear();
            if input.read_until(b'\n', &mut buffer)? == 0 {
                writeln!(output)?;
                break;
            }

            let line = match std::str::from_utf8(&buffer) {
                Ok(line) => line,
                Err(e) => {
                    warn!("skipping input line: {}", e);
                    writeln!(output, "Error: Input is not valid UTF-8")?;
                    continue;
                }
            };

            let command = line.trim();
            if Self::is_exit(command) {
                break;
            }

            let result = self.step(command);
            // The user already sees the prompt and what they typed
            Self::render(&result, output, false)?;
        }
        Ok(())
    }

    fn step(&mut self, command: &str) -> ExecutionResult {
        let result = self.session.execute(command);
        if !command.is_empty() {
            self.steps += 1;
        }
        result
    }

    fn is_exit(command: &str) -> bool {
        matches!(command, "exit" | "quit")
    }

    fn render<W: Write>(
        result: &ExecutionResult,
        output: &mut W,
        echo_prompt: bool,
    ) -> Result<(), HostRuntimeError> {
        if result.clear_screen {
            write!(output, "{}", CLEAR_SCREEN)?;
            return Ok(());
        }

        for line in &result.lines {
            if line.kind == LineKind::Prompt && !echo_prompt {
                continue;
            }
            Self::write_line(line, output)?;
        }
        Ok(())
    }

    fn write_line<W: Write>(line: &OutputLine, output: &mut W) -> Result<(), HostRuntimeError> {
        writeln!(output, "{}", line.text)?;
        Ok(())
    }
}
