//! Command execution through an injected shell backend.
//!
//! The backend is borrowed, never stored globally. Production code wires a
//! [`safecmd_hal::LinuxHal`] once at startup; tests pass a
//! [`safecmd_hal::FakeHal`] per test.

use crate::command::build_command_with;
use crate::exit::normalize_exit;
use crate::invocation::Invocation;
use crate::outcome::{CaptureOutcome, ExecOutcome};
use crate::validate::ProgramPolicy;
use safecmd_error::CmdResult;
use safecmd_hal::{ExecOps, PipeGuard, PopenOps};

/// Builds command strings and runs them through borrowed backends.
#[derive(Debug)]
pub struct Runner<'a, E: ?Sized, P: ?Sized> {
    exec: &'a E,
    popen: &'a P,
    policy: ProgramPolicy,
}

impl<'a, E: ?Sized, P: ?Sized> Clone for Runner<'a, E, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, E: ?Sized, P: ?Sized> Copy for Runner<'a, E, P> {}

impl<'a, H> Runner<'a, H, H>
where
    H: ExecOps + PopenOps + ?Sized,
{
    /// Use one HAL for both execution and capture.
    pub fn new(hal: &'a H) -> Self {
        Self::with_backends(hal, hal)
    }
}

impl<'a, E, P> Runner<'a, E, P>
where
    E: ExecOps + ?Sized,
    P: PopenOps + ?Sized,
{
    pub fn with_backends(exec: &'a E, popen: &'a P) -> Self {
        Self {
            exec,
            popen,
            policy: ProgramPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ProgramPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ProgramPolicy {
        self.policy
    }

    /// Build the command string this runner would execute.
    pub fn build<S: AsRef<str>>(&self, program: &str, args: &[S]) -> CmdResult<String> {
        build_command_with(self.policy, program, args)
    }

    /// Run the command and wait for it.
    ///
    /// `Err` only for a program name that fails validation. A command that
    /// ran and failed comes back as `Ok` with `success() == false`.
    pub fn execute<S: AsRef<str>>(&self, program: &str, args: &[S]) -> CmdResult<ExecOutcome> {
        let command = self.build(program, args)?;
        log::debug!("execute: {}", command);
        let raw = self.exec.run_shell(&command);
        let outcome = normalize_exit(&raw);
        if !outcome.success() {
            log::debug!("command exited unsuccessfully ({}): {}", raw, command);
        }
        Ok(outcome)
    }

    /// Run the command and read its whole standard output.
    ///
    /// The pipe is closed before this returns on every path. A pipe that
    /// cannot be opened, or that fails mid-read, yields a failed outcome with
    /// no output.
    pub fn capture<S: AsRef<str>>(&self, program: &str, args: &[S]) -> CmdResult<CaptureOutcome> {
        let command = self.build(program, args)?;
        log::debug!("capture: {}", command);

        let pipe = match self.popen.popen_read(&command) {
            Ok(pipe) => pipe,
            Err(err) => {
                log::warn!("failed to open pipe for {}: {}", command, err);
                return Ok(CaptureOutcome::failed());
            }
        };

        let mut guard = PipeGuard::new(pipe);
        let output = match guard.read_all() {
            Ok(output) => output,
            Err(err) => {
                log::warn!("failed to read output of {}: {}", command, err);
                return Ok(CaptureOutcome::failed());
            }
        };
        if let Err(err) = guard.close() {
            log::warn!("failed to close pipe for {}: {}", command, err);
        }
        Ok(CaptureOutcome::captured(output))
    }

    pub fn execute_invocation(&self, invocation: &Invocation) -> CmdResult<ExecOutcome> {
        self.execute(&invocation.program, invocation.args.as_slice())
    }

    pub fn capture_invocation(&self, invocation: &Invocation) -> CmdResult<CaptureOutcome> {
        self.capture(&invocation.program, invocation.args.as_slice())
    }
}
