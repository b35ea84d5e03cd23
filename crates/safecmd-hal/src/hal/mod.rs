//! HAL trait definitions and implementations.
//!
//! This module defines the shell execution traits and provides both a real
//! (LinuxHal) and a fake (FakeHal) implementation.

pub mod exec_ops;
pub mod fake_hal;
pub mod guards;
pub mod linux_hal;
pub mod popen_ops;
pub mod raw_exit;

pub use exec_ops::ExecOps;
pub use fake_hal::{FakeHal, FakePipe, Operation};
pub use guards::PipeGuard;
pub use linux_hal::{ChildPipe, LinuxHal, DEFAULT_SHELL};
pub use popen_ops::{PipeHandle, PopenOps};
pub use raw_exit::{RawExit, RawValue, EXIT_REASON, SIGNAL_REASON};
