use assert_cmd::Command;
use predicates::prelude::*;

fn cargo_bin() -> Command { Command::cargo_bin("bf").unwrap() }

#[test]
fn check_prints_filtered_program_and_pairs() {
    cargo_bin()
        .args(["check", "g+-[dgg..dg.]dg<<fgdd<&&&"])
        .assert()
        .success()
        .stdout("+-[...]<<<\n2 -> 6\n");
}

#[test]
fn check_lists_nested_pairs_by_open_index() {
    cargo_bin()
        .args(["check", "+-[..[..]..]-+"])
        .assert()
        .success()
        .stdout("+-[..[..]..]-+\n2 -> 11\n5 -> 8\n");
}

#[test]
fn check_without_loops_prints_only_program() {
    cargo_bin()
        .args(["check", "++++--+><><"])
        .assert()
        .success()
        .stdout("++++--+><><\n");
}

#[test]
fn check_reports_unclosed_bracket() {
    cargo_bin()
        .args(["check", "[[]"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unmatched bracket '['")
            .and(predicate::str::contains("at instruction 0")));
}

#[test]
fn check_accepts_code_starting_with_minus() {
    cargo_bin()
        .args(["check", "-[+]"])
        .assert()
        .success()
        .stdout("-[+]\n1 -> 3\n");
}
