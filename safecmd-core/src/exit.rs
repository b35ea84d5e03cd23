//! Exit result normalization.

use crate::outcome::ExecOutcome;
use safecmd_hal::RawExit;

/// Fold any raw completion shape into one `(success, code)` outcome.
///
/// - `(status, reason, code)`: success iff `status`; code passed through.
/// - bare code: success iff zero; code passed through.
/// - bare flag: code 0 on success, 1 on failure.
/// - no result, or a shape nobody documented: failure with code 1.
pub fn normalize_exit(raw: &RawExit) -> ExecOutcome {
    match raw {
        RawExit::Completed { status, code, .. } => ExecOutcome::new(*status, *code),
        RawExit::Code(code) => ExecOutcome::new(*code == 0, *code),
        RawExit::Flag(true) => ExecOutcome::new(true, 0),
        RawExit::Flag(false) => ExecOutcome::new(false, 1),
        RawExit::Absent => ExecOutcome::new(false, 1),
        RawExit::Unrecognized(shape) => {
            log::warn!("treating unexpected exit result {} as failure", shape);
            ExecOutcome::new(false, 1)
        }
    }
}
