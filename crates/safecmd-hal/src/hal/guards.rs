use crate::{BackendResult, PipeHandle, RawExit};
use std::io::{self, Read};

/// RAII guard that closes a pipe when dropped.
///
/// Closing explicitly with [`PipeGuard::close`] returns the completion result;
/// a guard dropped on an error path closes the pipe and logs any failure.
#[derive(Debug)]
pub struct PipeGuard<P: PipeHandle> {
    pipe: P,
    active: bool,
}

impl<P: PipeHandle> PipeGuard<P> {
    pub fn new(pipe: P) -> Self {
        Self { pipe, active: true }
    }

    /// Read everything left in the pipe as text.
    ///
    /// Output that is not valid UTF-8 fails with `InvalidData` rather than
    /// being altered.
    pub fn read_all(&mut self) -> io::Result<String> {
        let mut buf = Vec::new();
        self.pipe.read_to_end(&mut buf)?;
        String::from_utf8(buf).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }

    /// Close the pipe now and return how the process finished.
    pub fn close(mut self) -> BackendResult<RawExit> {
        self.active = false;
        self.pipe.close()
    }
}

impl<P: PipeHandle> Read for PipeGuard<P> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.pipe.read(buf)
    }
}

impl<P: PipeHandle> Drop for PipeGuard<P> {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        if let Err(err) = self.pipe.close() {
            log::warn!("pipe guard failed to close pipe: {}", err);
        }
    }
}
