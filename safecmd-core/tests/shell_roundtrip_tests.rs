#![cfg(unix)]

use safecmd_core::{escape, Runner};
use safecmd_hal::LinuxHal;
use tempfile::tempdir;

fn echo_back(hal: &LinuxHal, value: &str) -> (bool, Option<String>) {
    Runner::new(hal)
        .capture("printf", &["%s", value])
        .expect("printf is a valid program name")
        .into_parts()
}

#[test]
fn escaped_values_round_trip_through_sh() {
    let hal = LinuxHal::new();
    let samples = [
        "",
        "plain",
        "hello world",
        "'",
        "''",
        "it's a 'test'",
        "\"double\" and 'single'",
        "back\\slash",
        "tab\tnew\nline\rcr",
        "; & | ` $ ( ) { } [ ] < > ! # ~",
        "*.rs ?x [a-z]",
        "$HOME ${PATH} $((1+1))",
        "-n",
        "unicode: ünïcödé ✓",
    ];

    for sample in samples {
        let (success, output) = echo_back(&hal, sample);
        assert!(success, "capture failed for {sample:?}");
        assert_eq!(output.as_deref(), Some(sample), "mismatch for {sample:?}");
    }
}

#[test]
fn escaped_token_is_one_word() {
    let hal = LinuxHal::new();
    // `set --` re-splits nothing: the quoted token must arrive as exactly one positional.
    let script = format!("set -- {}; printf %s $#", escape("a b  'c' $d"));
    let (success, output) = Runner::new(&hal)
        .capture("sh", &["-c", script.as_str()])
        .unwrap()
        .into_parts();
    assert!(success);
    assert_eq!(output.as_deref(), Some("1"));
}

#[test]
fn adversarial_arguments_are_literal() {
    let dir = tempdir().unwrap();
    let marker = dir.path().join("pwned");
    let marker_str = marker.display().to_string();
    let hal = LinuxHal::new();

    let attacks = [
        format!("; touch {marker_str}"),
        format!("`touch {marker_str}`"),
        format!("$(touch {marker_str})"),
        format!("' ; touch {marker_str} ; '"),
        format!("\n touch {marker_str}"),
        format!("&& touch {marker_str}"),
    ];

    for attack in &attacks {
        let (success, output) = echo_back(&hal, attack);
        assert!(success);
        assert_eq!(output.as_deref(), Some(attack.as_str()));
        assert!(!marker.exists(), "{attack:?} escaped its quotes");
    }
}

#[test]
fn execute_reports_real_exit_codes() {
    let hal = LinuxHal::new();
    let runner = Runner::new(&hal);
    let none: [&str; 0] = [];

    assert_eq!(runner.execute("true", &none).unwrap().as_pair(), (true, 0));
    assert_eq!(runner.execute("false", &none).unwrap().as_pair(), (false, 1));
    assert_eq!(
        runner.execute("sh", &["-c", "exit 42"]).unwrap().as_pair(),
        (false, 42)
    );
}

#[test]
fn missing_program_is_a_failed_outcome() {
    let hal = LinuxHal::new();
    let none: [&str; 0] = [];
    let outcome = Runner::new(&hal)
        .execute("safecmd-definitely-not-installed", &none)
        .unwrap();
    assert_eq!(outcome.as_pair(), (false, 127));
}

#[test]
fn capture_reports_success_even_when_command_fails() {
    let hal = LinuxHal::new();
    let (success, output) = Runner::new(&hal)
        .capture("sh", &["-c", "printf partial; exit 3"])
        .unwrap()
        .into_parts();
    assert!(success);
    assert_eq!(output.as_deref(), Some("partial"));
}

#[test]
fn capture_refuses_output_that_is_not_utf8() {
    let hal = LinuxHal::new();
    let (success, output) = Runner::new(&hal)
        .capture("printf", &["\\377\\376"])
        .unwrap()
        .into_parts();
    assert!(!success);
    assert_eq!(output, None);
}

#[test]
fn capture_keeps_multibyte_utf8_intact() {
    let hal = LinuxHal::new();
    let (success, output) = echo_back(&hal, "naïve ☃ 日本");
    assert!(success);
    assert_eq!(output.as_deref(), Some("naïve ☃ 日本"));
}

#[test]
fn nul_byte_cannot_reach_the_shell() {
    // The process primitive refuses NUL in arguments, so the pipe never opens.
    let hal = LinuxHal::new();
    let (success, output) = echo_back(&hal, "a\0b");
    assert!(!success);
    assert_eq!(output, None);
}

#[test]
fn capture_with_missing_shell_fails_cleanly() {
    let hal = LinuxHal::with_shell("/nonexistent/sh");
    let none: [&str; 0] = [];
    let outcome = Runner::new(&hal).capture("true", &none).unwrap();
    assert_eq!(outcome.into_parts(), (false, None));
}
