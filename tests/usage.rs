use assert_cmd::Command;
use predicates::prelude::*;

fn cargo_bin() -> Command { Command::cargo_bin("bf").unwrap() }

#[test]
fn no_subcommand_prints_usage_and_exits_2() {
    cargo_bin()
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn top_level_help_exits_0() {
    cargo_bin()
        .arg("--help")
        .assert()
        .code(0)
        .stderr(predicate::str::contains("run").and(predicate::str::contains("check")));
}

#[test]
fn run_without_code_is_usage_error() {
    cargo_bin()
        .arg("run")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:").and(predicate::str::contains("--max-steps")));
}

#[test]
fn run_help_exits_0() {
    cargo_bin()
        .args(["run", "-h"])
        .assert()
        .code(0)
        .stderr(predicate::str::contains("--lenient"));
}

#[test]
fn check_help_exits_0() {
    cargo_bin()
        .args(["check", "--help"])
        .assert()
        .code(0)
        .stderr(predicate::str::contains("open -> close"));
}
