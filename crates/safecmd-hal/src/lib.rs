//! safecmd Hardware Abstraction Layer (HAL).
//!
//! Everything that spawns a process lives behind the traits in [`hal`], so the
//! command layer can be exercised against [`FakeHal`] without touching the OS.

pub mod error;
pub mod hal;

pub use error::{BackendError, BackendResult};
pub use hal::*;
