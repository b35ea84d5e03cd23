//! Output-capturing shell execution (popen-style).

use super::RawExit;
use crate::BackendResult;
use std::io::Read;

/// A readable handle on a spawned command's standard output.
pub trait PipeHandle: Read {
    /// Release the pipe and wait for the process behind it.
    ///
    /// Calling `close` twice returns [`crate::BackendError::PipeClosed`].
    fn close(&mut self) -> BackendResult<RawExit>;
}

/// Popen trait (spawn a command with its stdout connected to a pipe).
pub trait PopenOps {
    type Pipe: PipeHandle;

    /// Spawn `command` through the shell and return a handle on its stdout.
    fn popen_read(&self, command: &str) -> BackendResult<Self::Pipe>;
}

impl<T: PopenOps + ?Sized> PopenOps for &T {
    type Pipe = T::Pipe;

    fn popen_read(&self, command: &str) -> BackendResult<Self::Pipe> {
        (**self).popen_read(command)
    }
}
