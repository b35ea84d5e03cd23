//! Safe shell command construction and execution.
//!
//! A command is a program name plus an argument list. The program name is
//! validated by rejection (it is the one unquoted token), every argument is
//! single-quoted, and the resulting string is handed to a shell backend from
//! [`safecmd_hal`]. Raw completion results are normalized into
//! [`ExecOutcome`] / [`CaptureOutcome`].
//!
//! Failures of the spawned process are reported through `success`, not as
//! `Err`. Both outcome types are `#[must_use]`; a caller that never looks at
//! `success` will treat a failed command as if it had worked.

pub mod command;
pub mod config;
pub mod escape;
pub mod exit;
pub mod invocation;
pub mod logging;
pub mod outcome;
pub mod runner;
pub mod validate;

pub use command::{build_command, build_command_with};
pub use config::RunnerConfig;
pub use escape::{escape, escape_args};
pub use exit::normalize_exit;
pub use invocation::Invocation;
pub use outcome::{CaptureOutcome, ExecOutcome};
pub use runner::Runner;
pub use safecmd_error::{CmdError, CmdResult};
pub use validate::{validate_args, validate_program, ProgramPolicy};
