//! # Shell Host Runtime
//!
//! This crate provides the host that runs a shell session.
//!
//! ## Philosophy
//!
//! - **Host owns I/O**: The session never prints; the host renders its lines
//! - **Scripted mode is first-class**: For tests and demos
//! - **No terminal emulation**: Lines in, lines out
//!
//! ## Responsibilities
//!
//! The host runtime:
//! - Builds a session from typed settings
//! - Reads commands from an input stream or from a script
//! - Writes every output line the session produces
//! - Stops on end of input, `exit` or `quit`

pub mod input_script;
pub mod runtime;

pub use input_script::{CommandScript, CommandScriptError};
pub use runtime::{HostMode, HostRuntime, HostRuntimeConfig, HostRuntimeError};
