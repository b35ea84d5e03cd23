//! Command string assembly.

use crate::escape::escape_args;
use crate::validate::ProgramPolicy;
use safecmd_error::CmdResult;

/// Build `program 'arg1' 'arg2' ...` after validating `program` with the default policy.
///
/// An invalid program name aborts construction; nothing is returned for the
/// caller to run. With no arguments the program name is returned unchanged.
pub fn build_command<S: AsRef<str>>(program: &str, args: &[S]) -> CmdResult<String> {
    build_command_with(ProgramPolicy::default(), program, args)
}

/// [`build_command`] with an explicit program name policy.
pub fn build_command_with<S: AsRef<str>>(
    policy: ProgramPolicy,
    program: &str,
    args: &[S],
) -> CmdResult<String> {
    policy.check(program)?;
    if args.is_empty() {
        return Ok(program.to_string());
    }
    Ok(format!("{} {}", program, escape_args(args)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use safecmd_error::CmdError;

    #[test]
    fn builds_with_arguments() {
        assert_eq!(
            build_command("echo", &["hello world"]).unwrap(),
            "echo 'hello world'"
        );
        assert_eq!(
            build_command("/usr/bin/find", &[".", "-name", "*.rs"]).unwrap(),
            "/usr/bin/find '.' '-name' '*.rs'"
        );
    }

    #[test]
    fn no_arguments_returns_program() {
        let none: [&str; 0] = [];
        assert_eq!(build_command("echo", &none).unwrap(), "echo");
    }

    #[test]
    fn empty_string_argument_is_kept() {
        assert_eq!(build_command("printf", &[""]).unwrap(), "printf ''");
    }

    #[test]
    fn adversarial_arguments_stay_quoted() {
        assert_eq!(
            build_command("echo", &["; rm -rf /", "$(whoami)"]).unwrap(),
            "echo '; rm -rf /' '$(whoami)'"
        );
    }

    #[test]
    fn invalid_program_aborts() {
        let err = build_command("echo;", &["x"]).unwrap_err();
        assert!(matches!(err, CmdError::InvalidProgramName { .. }));
    }

    #[test]
    fn strict_policy_applies() {
        let none: [&str; 0] = [];
        assert!(build_command_with(ProgramPolicy::Strict, "ls*", &none).is_err());
        assert!(build_command_with(ProgramPolicy::Blacklist, "ls*", &none).is_ok());
    }
}
