use std::io;
use thiserror::Error;

pub type BackendResult<T> = Result<T, BackendError>;
pub type CmdResult<T> = Result<T, CmdError>;

/// Failures raised at the process boundary (spawning a shell, opening a pipe).
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Shell not found: {0}")]
    ShellNotFound(String),

    #[error("Failed to open pipe for `{command}`: {reason}")]
    PipeOpen { command: String, reason: String },

    #[error("Pipe already closed")]
    PipeClosed,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Failures of command construction and execution.
///
/// Only `InvalidProgramName` aborts a call. Process failures and pipe failures
/// are reported through the outcome types instead; the `ExecutionFailure` and
/// `PipeOpenFailure` variants exist for callers that convert an outcome into a
/// `Result` and want `?` propagation.
#[derive(Error, Debug)]
pub enum CmdError {
    #[error("Invalid program name {name:?}: {reason}")]
    InvalidProgramName { name: String, reason: String },

    #[error("Invalid argument at index {index}: expected text, found {found}")]
    InvalidArgumentType { index: usize, found: String },

    #[error("Invalid invocation: {0}")]
    InvalidInvocation(String),

    #[error("Command failed (exit={code})")]
    ExecutionFailure { code: i32 },

    #[error("Failed to open output pipe")]
    PipeOpenFailure,
}

impl CmdError {
    pub fn invalid_program(name: impl Into<String>, reason: impl Into<String>) -> Self {
        CmdError::InvalidProgramName {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
