use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("bf").unwrap();
    cmd.env("BF_CONFIG", "/nonexistent/bf.toml");
    cmd
}

#[test]
fn test_tape_underflow_error() {
    cargo_bin()
        .timeout(Duration::from_secs(2)).arg("run").arg("+<")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("tape underflow")
            .and(predicate::str::contains("at instruction 1")));
}

#[test]
fn test_error_position_counts_filtered_instructions() {
    cargo_bin()
        .timeout(Duration::from_secs(2)).arg("run").arg("comment <")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at instruction 0"));
}

#[test]
fn test_output_before_error_is_kept() {
    cargo_bin()
        .timeout(Duration::from_secs(2)).arg("run").arg("+++.<<")
        .assert()
        .failure()
        .stdout("\u{3}\n");
}

#[test]
fn test_unmatched_open_bracket_rejected_before_running() {
    cargo_bin()
        .timeout(Duration::from_secs(2)).arg("run").arg("+.[")
        .assert()
        .failure()
        .stdout(predicate::str::contains("\u{1}").not())
        .stderr(predicate::str::contains("unmatched bracket '['"));
}

#[test]
fn test_stray_close_bracket_rejected() {
    cargo_bin()
        .timeout(Duration::from_secs(2)).arg("run").arg("+]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unmatched bracket ']'"));
}

#[test]
fn test_lenient_skips_unused_unmatched_bracket() {
    cargo_bin()
        .timeout(Duration::from_secs(2)).args(["run", "--lenient", "+[."])
        .assert()
        .success()
        .stdout("\u{1}\n");
}

#[test]
fn test_lenient_fails_when_jump_is_taken() {
    cargo_bin()
        .timeout(Duration::from_secs(2)).args(["run", "--lenient", "["])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unmatched bracket '['"));
}

#[test]
fn test_missing_file_error() {
    cargo_bin()
        .timeout(Duration::from_secs(2)).args(["run", "--file", "/nonexistent/program.bf"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read code file"));
}

#[test]
fn test_file_and_code_together_is_usage_error() {
    cargo_bin()
        .timeout(Duration::from_secs(2)).args(["run", "--file", "x.bf", "+"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot use positional code together with --file"));
}
