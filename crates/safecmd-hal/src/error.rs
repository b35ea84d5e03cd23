pub use safecmd_error::{BackendError, BackendResult};
