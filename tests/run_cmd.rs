use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("bf").unwrap();
    // Keep a user's bf.toml out of the picture
    cmd.env("BF_CONFIG", "/nonexistent/bf.toml");
    cmd
}

fn small_valid_bf() -> &'static str { "+++." }

fn read_to_tempfile(content: &str) -> tempfile::NamedTempFile {
    let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
    write!(tf, "{}", content).unwrap();
    tf
}

#[test]
fn test_run_positional_code_success() {
    cargo_bin()
        .arg("run").arg(small_valid_bf())
        .assert()
        .success()
        .stdout("\u{3}\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_run_file_success() {
    let tf = read_to_tempfile("print at sign: ++++++++[>++++++++<-]>.");
    cargo_bin()
        .arg("run").arg("--file").arg(tf.path())
        .assert()
        .success()
        .stdout("@\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_run_concatenates_code_parts() {
    cargo_bin()
        .args(["run", "++++++++[>++++++++", "<-]>."])
        .assert()
        .success()
        .stdout("@\n");
}

#[test]
fn test_run_hello_world() {
    let code = "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.";
    cargo_bin()
        .arg("run").arg(code)
        .assert()
        .success()
        .stdout("Hello World!\n\n");
}

#[test]
fn test_run_reads_a_line_per_input() {
    cargo_bin()
        .arg("run").arg(",.>,.")
        .write_stdin("Zed\nq\n")
        .assert()
        .success()
        .stdout("Zq\n");
}

#[test]
fn test_run_countdown_from_first_input_character() {
    let mut expected: Vec<u8> = (1..=65u8).rev().collect();
    expected.push(b'\n');
    cargo_bin()
        .arg("run").arg(",[.-]")
        .write_stdin("AB\n")
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_run_input_at_eof_reads_zero() {
    cargo_bin()
        .arg("run").arg("+++,[.-]")
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn test_run_debug_prints_table() {
    cargo_bin()
        .args(["run", "--debug", ">"])
        .assert()
        .success()
        .stdout(predicate::str::contains("STEP | IP")
            .and(predicate::str::contains("Moved pointer head to index 1")))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_run_debug_suppresses_output() {
    cargo_bin()
        .args(["run", "-d", "+++."])
        .assert()
        .success()
        .stdout(predicate::str::contains("suppressed in debug")
            .and(predicate::str::contains("\u{3}").not()));
}

#[test]
fn test_run_code_starting_with_minus() {
    cargo_bin()
        .arg("run").arg("-.")
        .assert()
        .success()
        .stdout(vec![255u8, b'\n'])
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_run_flags_before_code_starting_with_minus() {
    cargo_bin()
        .args(["run", "--max-steps", "100", "-[+]+."])
        .assert()
        .success()
        .stdout("\u{1}\n");
}
