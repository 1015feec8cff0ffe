//! CLI interface tests: argument handling, usage text, output channels.

use assert_cmd::Command;
use predicates::prelude::*;

fn sol25c() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sol25c"))
}

#[test]
fn test_help_short_flag() {
    sol25c()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage").and(predicate::str::contains("sol25c")));
}

#[test]
fn test_help_long_flag() {
    sol25c()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("standard input"));
}

#[test]
fn test_unexpected_argument_exits_10() {
    sol25c()
        .arg("input.sol25")
        .assert()
        .code(10)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_help_with_extra_argument_exits_10() {
    sol25c().args(["--help", "now"]).assert().code(10);
}

#[test]
fn test_unknown_flag_exits_10() {
    sol25c().arg("--version").assert().code(10);
}

#[test]
fn test_failure_writes_nothing_to_stdout() {
    sol25c()
        .write_stdin("class Foo : Object { run [|]}")
        .assert()
        .code(31)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty().not());
}

#[test]
fn test_diagnostic_reports_position() {
    sol25c()
        .write_stdin("class Main : Object { run [| x := @. ]}")
        .assert()
        .code(21)
        .stderr(predicate::str::contains("byte 34"));
}

#[test]
fn test_empty_input_is_missing_main() {
    sol25c().write_stdin("").assert().code(31);
}

#[test]
fn test_deterministic_output() {
    let source = "\"demo\" class Main : Object { run [| x := 'a'. y := x. ]}";
    let first = sol25c().write_stdin(source).assert().success();
    let second = sol25c().write_stdin(source).assert().success();
    assert_eq!(
        first.get_output().stdout,
        second.get_output().stdout
    );
}
