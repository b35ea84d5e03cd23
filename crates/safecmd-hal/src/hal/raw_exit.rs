//! Raw completion results as reported by a shell backend.
//!
//! Shell runtimes disagree on what "the command finished" looks like. Some
//! report a `(status, reason, code)` triple, older ones a bare exit code or a
//! bare boolean, and a shell that never started reports nothing at all.
//! [`RawExit`] names each of those shapes; [`RawExit::decode`] maps a
//! positional value list onto them.

use std::fmt;

/// Reason text for a process that exited normally.
pub const EXIT_REASON: &str = "exit";
/// Reason text for a process that was terminated by a signal.
pub const SIGNAL_REASON: &str = "signal";

/// One positional value in a raw completion result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Nil,
    Bool(bool),
    Int(i64),
    Text(String),
}

impl RawValue {
    fn kind(&self) -> &'static str {
        match self {
            RawValue::Nil => "nil",
            RawValue::Bool(_) => "bool",
            RawValue::Int(_) => "int",
            RawValue::Text(_) => "text",
        }
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Int(i64::from(value))
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RawValue::Nil)
    }
}

/// The shapes a raw completion result can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawExit {
    /// `(status, reason, code)`; `status` is true only for a clean exit.
    Completed {
        status: bool,
        reason: String,
        code: i32,
    },
    /// A bare numeric exit code.
    Code(i32),
    /// A bare success flag.
    Flag(bool),
    /// No result at all.
    Absent,
    /// Anything else; the payload describes the shape that was seen.
    Unrecognized(String),
}

impl RawExit {
    pub fn exited(code: i32) -> Self {
        RawExit::Completed {
            status: code == 0,
            reason: EXIT_REASON.to_string(),
            code,
        }
    }

    pub fn signaled(signal: i32) -> Self {
        RawExit::Completed {
            status: false,
            reason: SIGNAL_REASON.to_string(),
            code: signal,
        }
    }

    /// Decode a positional value list by arity and type.
    ///
    /// Values past the third are ignored for the triple shape.
    pub fn decode(values: &[RawValue]) -> RawExit {
        match values {
            [] | [RawValue::Nil] => RawExit::Absent,
            [RawValue::Bool(flag)] => RawExit::Flag(*flag),
            [RawValue::Int(code)] => match i32::try_from(*code) {
                Ok(code) => RawExit::Code(code),
                Err(_) => RawExit::Unrecognized(format!("exit code {} out of range", code)),
            },
            [
                status @ (RawValue::Bool(_) | RawValue::Nil),
                RawValue::Text(reason),
                RawValue::Int(code),
                ..,
            ] => match i32::try_from(*code) {
                Ok(code) => RawExit::Completed {
                    status: matches!(status, RawValue::Bool(true)),
                    reason: reason.clone(),
                    code,
                },
                Err(_) => RawExit::Unrecognized(format!("exit code {} out of range", code)),
            },
            other => RawExit::Unrecognized(describe(other)),
        }
    }
}

impl fmt::Display for RawExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawExit::Completed {
                status,
                reason,
                code,
            } => write!(f, "({}, {}, {})", status, reason, code),
            RawExit::Code(code) => write!(f, "code {}", code),
            RawExit::Flag(flag) => write!(f, "flag {}", flag),
            RawExit::Absent => write!(f, "no result"),
            RawExit::Unrecognized(shape) => write!(f, "unrecognized result {}", shape),
        }
    }
}

fn describe(values: &[RawValue]) -> String {
    let kinds: Vec<&str> = values.iter().map(RawValue::kind).collect();
    format!("({})", kinds.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_triple() {
        let raw = RawExit::decode(&[true.into(), "exit".into(), 0.into()]);
        assert_eq!(raw, RawExit::exited(0));

        let raw = RawExit::decode(&[RawValue::Nil, "exit".into(), 1.into()]);
        assert_eq!(
            raw,
            RawExit::Completed {
                status: false,
                reason: "exit".to_string(),
                code: 1
            }
        );
    }

    #[test]
    fn triple_ignores_trailing_values() {
        let raw = RawExit::decode(&[
            true.into(),
            "exit".into(),
            0.into(),
            RawValue::Text("extra".to_string()),
        ]);
        assert_eq!(raw, RawExit::exited(0));
    }

    #[test]
    fn decodes_single_values() {
        assert_eq!(RawExit::decode(&[0.into()]), RawExit::Code(0));
        assert_eq!(RawExit::decode(&[7.into()]), RawExit::Code(7));
        assert_eq!(RawExit::decode(&[false.into()]), RawExit::Flag(false));
    }

    #[test]
    fn decodes_absence() {
        assert_eq!(RawExit::decode(&[]), RawExit::Absent);
        assert_eq!(RawExit::decode(&[RawValue::Nil]), RawExit::Absent);
        assert_eq!(RawExit::decode(&[Option::<i32>::None.into()]), RawExit::Absent);
    }

    #[test]
    fn other_shapes_are_unrecognized() {
        let raw = RawExit::decode(&["exit".into()]);
        assert_eq!(raw, RawExit::Unrecognized("(text)".to_string()));

        let raw = RawExit::decode(&[true.into(), "exit".into()]);
        assert!(matches!(raw, RawExit::Unrecognized(_)));

        let raw = RawExit::decode(&[1.into(), "exit".into(), 0.into()]);
        assert!(matches!(raw, RawExit::Unrecognized(_)));

        let raw = RawExit::decode(&[RawValue::Int(i64::MAX)]);
        assert!(matches!(raw, RawExit::Unrecognized(_)));
    }

    #[test]
    fn triple_needs_text_reason_and_int_code() {
        let raw = RawExit::decode(&[true.into(), RawValue::Nil, 0.into()]);
        assert_eq!(raw, RawExit::Unrecognized("(bool, nil, int)".to_string()));

        let raw = RawExit::decode(&[true.into(), "exit".into(), "0".into()]);
        assert_eq!(raw, RawExit::Unrecognized("(bool, text, text)".to_string()));
    }

    #[test]
    fn signaled_is_never_success() {
        assert_eq!(
            RawExit::signaled(9),
            RawExit::Completed {
                status: false,
                reason: SIGNAL_REASON.to_string(),
                code: 9
            }
        );
    }
}
