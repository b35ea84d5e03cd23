//! Linux HAL implementation that hands command strings to a real shell.

use super::{ExecOps, PipeHandle, PopenOps, RawExit};
use crate::{BackendError, BackendResult};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, ExitStatus, Stdio};

pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Real HAL implementation: every command string runs as `<shell> -c <command>`.
#[derive(Debug, Clone)]
pub struct LinuxHal {
    shell: PathBuf,
}

impl Default for LinuxHal {
    fn default() -> Self {
        Self::new()
    }
}

impl LinuxHal {
    pub fn new() -> Self {
        Self::with_shell(DEFAULT_SHELL)
    }

    pub fn with_shell(shell: impl Into<PathBuf>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    pub fn shell(&self) -> &Path {
        &self.shell
    }

    fn shell_command(&self, command: &str) -> Command {
        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c").arg(command);
        cmd
    }
}

fn map_spawn_err(shell: &Path, command: &str, err: io::Error) -> BackendError {
    if err.kind() == io::ErrorKind::NotFound {
        return BackendError::ShellNotFound(shell.display().to_string());
    }
    BackendError::PipeOpen {
        command: command.to_string(),
        reason: err.to_string(),
    }
}

fn exit_from_status(status: ExitStatus) -> RawExit {
    if let Some(code) = status.code() {
        return RawExit::exited(code);
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return RawExit::signaled(signal);
        }
    }
    RawExit::Absent
}

impl ExecOps for LinuxHal {
    fn run_shell(&self, command: &str) -> RawExit {
        match self.shell_command(command).status() {
            Ok(status) => exit_from_status(status),
            Err(err) => {
                log::warn!("failed to spawn {}: {}", self.shell.display(), err);
                RawExit::Absent
            }
        }
    }
}

/// Read end of a spawned shell's stdout.
#[derive(Debug)]
pub struct ChildPipe {
    child: Child,
    stdout: Option<ChildStdout>,
}

impl Read for ChildPipe {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.stdout.as_mut() {
            Some(out) => out.read(buf),
            None => Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed")),
        }
    }
}

impl PipeHandle for ChildPipe {
    fn close(&mut self) -> BackendResult<RawExit> {
        // Dropping our end first lets a child blocked on a full pipe see EPIPE.
        if self.stdout.take().is_none() {
            return Err(BackendError::PipeClosed);
        }
        let status = self.child.wait()?;
        Ok(exit_from_status(status))
    }
}

impl PopenOps for LinuxHal {
    type Pipe = ChildPipe;

    fn popen_read(&self, command: &str) -> BackendResult<ChildPipe> {
        let mut child = self
            .shell_command(command)
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| map_spawn_err(&self.shell, command, e))?;

        match child.stdout.take() {
            Some(stdout) => Ok(ChildPipe {
                child,
                stdout: Some(stdout),
            }),
            None => {
                let _ = child.kill();
                let _ = child.wait();
                Err(BackendError::PipeOpen {
                    command: command.to_string(),
                    reason: "child stdout was not captured".to_string(),
                })
            }
        }
    }
}
