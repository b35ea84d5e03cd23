//! Program name and argument list validation.
//!
//! The two checks are deliberately separate. A program name is the one token
//! of the command string that is not quoted, so it is validated by rejecting
//! anything a shell could act on. Arguments are quoted, so their contents are
//! never inspected; only their type is.

use safecmd_error::{CmdError, CmdResult};
use serde::Deserialize;
use serde_json::Value;

/// Characters a shell treats as syntax and that may never appear in a program name.
pub const METACHARACTERS: &[char] = &[
    ';', '&', '|', '`', '$', '(', ')', '{', '}', '[', ']', '<', '>', '!', '#', '~',
];

/// Quote characters rejected in program names.
pub const QUOTES: &[char] = &['"', '\''];

/// How program names are screened.
///
/// `Blacklist` rejects the documented metacharacter, whitespace and quote
/// sets. It is a hand-curated list and is not proven complete against every
/// shell grammar. `Strict` only accepts ASCII alphanumerics and `. _ / + -`;
/// it is opt-in because it also rejects names the blacklist lets through
/// (for example `*`, `?`, `=` or non-ASCII names).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramPolicy {
    #[default]
    Blacklist,
    Strict,
}

impl ProgramPolicy {
    pub fn check(self, name: &str) -> CmdResult<()> {
        if name.is_empty() {
            return Err(CmdError::invalid_program(name, "program name is empty"));
        }
        match self {
            ProgramPolicy::Blacklist => check_blacklist(name),
            ProgramPolicy::Strict => check_strict(name),
        }
    }
}

fn check_blacklist(name: &str) -> CmdResult<()> {
    for ch in name.chars() {
        if METACHARACTERS.contains(&ch) {
            return Err(CmdError::invalid_program(
                name,
                format!("contains shell metacharacter {:?}", ch),
            ));
        }
        if ch.is_whitespace() {
            return Err(CmdError::invalid_program(
                name,
                format!("contains whitespace {:?}", ch),
            ));
        }
        if QUOTES.contains(&ch) {
            return Err(CmdError::invalid_program(
                name,
                format!("contains quote {:?}", ch),
            ));
        }
    }
    Ok(())
}

fn check_strict(name: &str) -> CmdResult<()> {
    match name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '/' | '+' | '-')))
    {
        Some(ch) => Err(CmdError::invalid_program(
            name,
            format!("character {:?} is not allowed", ch),
        )),
        None => Ok(()),
    }
}

/// Validate a program name against the default (blacklist) policy.
pub fn validate_program(name: &str) -> CmdResult<()> {
    ProgramPolicy::default().check(name)
}

/// Validate a program name that arrived as dynamic data.
pub fn validate_program_value(value: &Value) -> CmdResult<String> {
    match value {
        Value::String(name) => {
            validate_program(name)?;
            Ok(name.clone())
        }
        other => Err(CmdError::invalid_program(
            other.to_string(),
            format!("expected text, found {}", kind(other)),
        )),
    }
}

/// Check that every element of a dynamic argument list is text.
///
/// Reports the first offending element; nothing is coerced.
pub fn validate_args(values: &[Value]) -> CmdResult<Vec<String>> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(CmdError::InvalidArgumentType {
                index,
                found: kind(other).to_string(),
            }),
        })
        .collect()
}

pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
