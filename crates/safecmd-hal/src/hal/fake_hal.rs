//! Fake HAL implementation for testing.
//!
//! This implementation records every command string without executing it and
//! answers with pre-programmed results, allowing CI-safe tests of the command
//! layer.

use super::{ExecOps, PipeHandle, PopenOps, RawExit};
use crate::{BackendError, BackendResult};
use std::collections::VecDeque;
use std::io::{self, Read};
use std::sync::{Arc, Mutex, MutexGuard};

/// Operation records for testing and verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Exec { command: String },
    Popen { command: String },
}

impl Operation {
    pub fn command(&self) -> &str {
        match self {
            Operation::Exec { command } | Operation::Popen { command } => command,
        }
    }
}

/// Scripted answer for the next `popen_read`.
#[derive(Debug, Clone)]
enum PipeScript {
    Output(Vec<u8>),
    OpenFailure,
    ReadFailure,
}

/// Shared state for FakeHal operations.
#[derive(Debug, Default)]
struct FakeHalState {
    /// All operations that were recorded
    operations: Vec<Operation>,
    /// Results handed out by `run_shell`, front first
    exits: VecDeque<RawExit>,
    /// Behaviours handed out by `popen_read`, front first
    pipes: VecDeque<PipeScript>,
    reads: usize,
    closes: usize,
}

/// Fake HAL implementation that records operations without executing them.
///
/// Once the scripted results run out, `run_shell` answers with a clean exit
/// and `popen_read` with an empty pipe.
#[derive(Debug, Clone, Default)]
pub struct FakeHal {
    state: Arc<Mutex<FakeHalState>>,
}

impl FakeHal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fake whose `run_shell` answers with the given `(success, code)` pairs in order.
    pub fn with_exits<I>(exits: I) -> Self
    where
        I: IntoIterator<Item = (bool, i32)>,
    {
        let hal = Self::new();
        for (success, code) in exits {
            hal.push_exit_pair(success, code);
        }
        hal
    }

    fn lock(&self) -> MutexGuard<'_, FakeHalState> {
        match self.state.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Queue a raw result for the next `run_shell`.
    pub fn push_exit(&self, exit: RawExit) {
        self.lock().exits.push_back(exit);
    }

    /// Queue a `(status, "exit", code)` result for the next `run_shell`.
    pub fn push_exit_pair(&self, success: bool, code: i32) {
        self.push_exit(RawExit::Completed {
            status: success,
            reason: super::EXIT_REASON.to_string(),
            code,
        });
    }

    /// Queue stdout content for the next `popen_read`.
    pub fn push_pipe_output(&self, output: impl Into<Vec<u8>>) {
        self.lock().pipes.push_back(PipeScript::Output(output.into()));
    }

    /// Make the next `popen_read` fail to open.
    pub fn fail_next_popen(&self) {
        self.lock().pipes.push_back(PipeScript::OpenFailure);
    }

    /// Make the pipe returned by the next `popen_read` fail on read.
    pub fn fail_next_read(&self) {
        self.lock().pipes.push_back(PipeScript::ReadFailure);
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<Operation> {
        self.lock().operations.clone()
    }

    /// Get the recorded command strings, in call order.
    pub fn commands(&self) -> Vec<String> {
        self.lock()
            .operations
            .iter()
            .map(|op| op.command().to_string())
            .collect()
    }

    /// Get the number of operations recorded.
    pub fn operation_count(&self) -> usize {
        self.lock().operations.len()
    }

    /// Check if a specific operation was recorded.
    pub fn has_operation(&self, check: impl Fn(&Operation) -> bool) -> bool {
        self.lock().operations.iter().any(check)
    }

    /// Number of `read` calls made on fake pipes.
    pub fn read_count(&self) -> usize {
        self.lock().reads
    }

    /// Number of fake pipes closed.
    pub fn close_count(&self) -> usize {
        self.lock().closes
    }

    /// Clear all recorded operations and scripted results.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.operations.clear();
        state.exits.clear();
        state.pipes.clear();
        state.reads = 0;
        state.closes = 0;
    }
}

impl ExecOps for FakeHal {
    fn run_shell(&self, command: &str) -> RawExit {
        log::info!("FAKE HAL: sh -c {}", command);
        let mut state = self.lock();
        state.operations.push(Operation::Exec {
            command: command.to_string(),
        });
        state.exits.pop_front().unwrap_or_else(|| RawExit::exited(0))
    }
}

/// Pipe handed out by [`FakeHal::popen_read`].
#[derive(Debug)]
pub struct FakePipe {
    data: io::Cursor<Vec<u8>>,
    fail_read: bool,
    closed: bool,
    state: Arc<Mutex<FakeHalState>>,
}

impl FakePipe {
    fn lock(&self) -> MutexGuard<'_, FakeHalState> {
        match self.state.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Read for FakePipe {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.lock().reads += 1;
        if self.closed {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        }
        if self.fail_read {
            return Err(io::Error::new(io::ErrorKind::Other, "scripted read failure"));
        }
        self.data.read(buf)
    }
}

impl PipeHandle for FakePipe {
    fn close(&mut self) -> BackendResult<RawExit> {
        if self.closed {
            return Err(BackendError::PipeClosed);
        }
        self.closed = true;
        self.lock().closes += 1;
        Ok(RawExit::exited(0))
    }
}

impl PopenOps for FakeHal {
    type Pipe = FakePipe;

    fn popen_read(&self, command: &str) -> BackendResult<FakePipe> {
        log::info!("FAKE HAL: popen sh -c {}", command);
        let script = {
            let mut state = self.lock();
            state.operations.push(Operation::Popen {
                command: command.to_string(),
            });
            state
                .pipes
                .pop_front()
                .unwrap_or(PipeScript::Output(Vec::new()))
        };
        let (data, fail_read) = match script {
            PipeScript::Output(data) => (data, false),
            PipeScript::ReadFailure => (Vec::new(), true),
            PipeScript::OpenFailure => {
                return Err(BackendError::PipeOpen {
                    command: command.to_string(),
                    reason: "scripted open failure".to_string(),
                })
            }
        };

        Ok(FakePipe {
            data: io::Cursor::new(data),
            fail_read,
            closed: false,
            state: Arc::clone(&self.state),
        })
    }
}
