//! Fire-and-forget shell execution.
//!
//! Running a command string is "world-touching" and must go through the HAL so
//! callers can be tested without spawning real processes.

use super::RawExit;

/// Shell execution trait.
pub trait ExecOps {
    /// Run `command` through the shell and block until it completes.
    ///
    /// Implementations never fail: a shell that cannot be started is reported
    /// as [`RawExit::Absent`].
    fn run_shell(&self, command: &str) -> RawExit;
}

impl<T: ExecOps + ?Sized> ExecOps for &T {
    fn run_shell(&self, command: &str) -> RawExit {
        (**self).run_shell(command)
    }
}
