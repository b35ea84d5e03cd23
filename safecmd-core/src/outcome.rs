//! Normalized results handed back to callers.

use safecmd_error::{CmdError, CmdResult};

/// Result of a fire-and-forget execution.
///
/// Only [`crate::normalize_exit`] builds these.
#[must_use = "a failed command is only reported through `success()`"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecOutcome {
    success: bool,
    code: i32,
}

impl ExecOutcome {
    pub(crate) fn new(success: bool, code: i32) -> Self {
        Self { success, code }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn as_pair(&self) -> (bool, i32) {
        (self.success, self.code)
    }

    /// Turn a failed outcome into `CmdError::ExecutionFailure` for `?` propagation.
    pub fn into_result(self) -> CmdResult<i32> {
        if self.success {
            Ok(self.code)
        } else {
            Err(CmdError::ExecutionFailure { code: self.code })
        }
    }
}

/// Result of a capture execution.
///
/// `success` says the output pipe was opened and read to the end; it does not
/// reflect the exit status of the captured command.
#[must_use = "a failed capture is only reported through `success()`"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureOutcome {
    success: bool,
    output: Option<String>,
}

impl CaptureOutcome {
    pub(crate) fn captured(output: String) -> Self {
        Self {
            success: true,
            output: Some(output),
        }
    }

    pub(crate) fn failed() -> Self {
        Self {
            success: false,
            output: None,
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn into_parts(self) -> (bool, Option<String>) {
        (self.success, self.output)
    }

    /// Turn a failed capture into `CmdError::PipeOpenFailure` for `?` propagation.
    pub fn into_result(self) -> CmdResult<String> {
        self.output.ok_or(CmdError::PipeOpenFailure)
    }
}
