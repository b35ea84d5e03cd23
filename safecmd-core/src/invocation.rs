//! Invocations loaded from JSON or TOML.
//!
//! Batch files describe commands as data, so types are not guaranteed: the
//! program must be a string and every argument must be a string, or the
//! invocation is rejected with the matching validation error.

use crate::validate::{kind, validate_args};
use anyhow::{Context, Result};
use safecmd_error::{CmdError, CmdResult};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Decode `{"program": "...", "args": [...]}`. `args` may be omitted.
    ///
    /// The program name is only type-checked here; its contents are validated
    /// when the command is built.
    pub fn from_json(value: &Value) -> CmdResult<Self> {
        let fields = value.as_object().ok_or_else(|| {
            CmdError::InvalidInvocation(format!("expected an object, found {}", kind(value)))
        })?;

        let program = match fields.get("program") {
            Some(Value::String(name)) => name.clone(),
            Some(other) => {
                return Err(CmdError::invalid_program(
                    other.to_string(),
                    format!("expected text, found {}", kind(other)),
                ))
            }
            None => return Err(CmdError::invalid_program("", "program is missing")),
        };

        let args = match fields.get("args") {
            None => Vec::new(),
            Some(Value::Array(values)) => validate_args(values)?,
            Some(other) => {
                return Err(CmdError::InvalidInvocation(format!(
                    "args must be an array, found {}",
                    kind(other)
                )))
            }
        };

        Ok(Self { program, args })
    }

    /// Parse a JSON array of invocations.
    pub fn list_from_json_str(input: &str) -> Result<Vec<Self>> {
        let value: Value = serde_json::from_str(input).context("invalid JSON")?;
        Self::list_from_value(&value)
    }

    /// Parse a TOML document holding `[[invocation]]` tables.
    pub fn list_from_toml_str(input: &str) -> Result<Vec<Self>> {
        let mut doc: Value = toml::from_str(input).context("invalid TOML")?;
        let list = doc
            .get_mut("invocation")
            .map(Value::take)
            .unwrap_or_else(|| Value::Array(Vec::new()));
        Self::list_from_value(&list)
    }

    /// Load invocations from a `.json` or `.toml` file.
    pub fn load_file(path: &Path) -> Result<Vec<Self>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let parsed = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::list_from_toml_str(&content),
            _ => Self::list_from_json_str(&content),
        };
        parsed.with_context(|| format!("failed to load invocations from {}", path.display()))
    }

    fn list_from_value(value: &Value) -> Result<Vec<Self>> {
        let items = value
            .as_array()
            .ok_or_else(|| anyhow::anyhow!("expected a list of invocations, found {}", kind(value)))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                Self::from_json(item).with_context(|| format!("invocation #{}", i + 1))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_program_and_args() {
        let inv = Invocation::from_json(&json!({"program": "echo", "args": ["a b", "c"]})).unwrap();
        assert_eq!(inv, Invocation::new("echo", ["a b", "c"]));
    }

    #[test]
    fn args_default_to_empty() {
        let inv = Invocation::from_json(&json!({"program": "uptime"})).unwrap();
        assert!(inv.args.is_empty());
    }

    #[test]
    fn non_text_program_is_invalid_program_name() {
        let err = Invocation::from_json(&json!({"program": ["ls"]})).unwrap_err();
        assert!(matches!(err, CmdError::InvalidProgramName { .. }));

        let err = Invocation::from_json(&json!({"args": []})).unwrap_err();
        assert!(matches!(err, CmdError::InvalidProgramName { .. }));
    }

    #[test]
    fn non_text_argument_is_rejected() {
        let err = Invocation::from_json(&json!({"program": "sleep", "args": [5]})).unwrap_err();
        assert!(matches!(err, CmdError::InvalidArgumentType { index: 0, .. }));
    }

    #[test]
    fn malformed_shapes_are_invalid_invocations() {
        assert!(matches!(
            Invocation::from_json(&json!("echo")),
            Err(CmdError::InvalidInvocation(_))
        ));
        assert!(matches!(
            Invocation::from_json(&json!({"program": "echo", "args": "hi"})),
            Err(CmdError::InvalidInvocation(_))
        ));
    }

    #[test]
    fn parses_json_list() {
        let list = Invocation::list_from_json_str(
            r#"[{"program": "true"}, {"program": "echo", "args": ["x"]}]"#,
        )
        .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1], Invocation::new("echo", ["x"]));
    }

    #[test]
    fn json_list_reports_position() {
        let err = Invocation::list_from_json_str(r#"[{"program": "true"}, {"program": 1}]"#)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("invocation #2"));
    }

    #[test]
    fn parses_toml_tables() {
        let list = Invocation::list_from_toml_str(
            r#"
[[invocation]]
program = "echo"
args = ["it's", "$HOME"]

[[invocation]]
program = "true"
"#,
        )
        .unwrap();
        assert_eq!(
            list,
            vec![
                Invocation::new("echo", ["it's", "$HOME"]),
                Invocation::new("true", Vec::<String>::new()),
            ]
        );
    }

    #[test]
    fn toml_integer_argument_is_rejected() {
        let err = Invocation::list_from_toml_str(
            r#"
[[invocation]]
program = "sleep"
args = [1]
"#,
        )
        .unwrap_err();
        let cause = err.root_cause().to_string();
        assert!(cause.contains("expected text"), "{cause}");
    }

    #[test]
    fn loads_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("jobs.json");
        std::fs::write(&json_path, r#"[{"program": "date"}]"#).unwrap();
        let toml_path = dir.path().join("jobs.toml");
        std::fs::write(&toml_path, "[[invocation]]\nprogram = \"date\"\n").unwrap();

        assert_eq!(Invocation::load_file(&json_path).unwrap().len(), 1);
        assert_eq!(Invocation::load_file(&toml_path).unwrap().len(), 1);
        assert!(Invocation::load_file(&dir.path().join("missing.json")).is_err());
    }
}
