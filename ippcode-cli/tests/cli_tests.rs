//! Integration tests for the IPPcode24 CLI.
//!
//! These tests invoke the `ippcode` binary as a subprocess and check
//! exit codes, stdout, and stderr.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(deprecated)]
fn ippcode() -> Command {
    Command::cargo_bin("ippcode").unwrap()
}

/// Return the workspace root (parent of ippcode-cli/).
fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .to_path_buf()
}

/// Return the absolute path to a sample program.
fn test_program(name: &str) -> PathBuf {
    workspace_root().join("tests/programs").join(name)
}

/// Write a source file into a temp dir and return its path.
fn write_source(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

// ---- No-args / help ----

#[test]
fn no_args_prints_usage_and_exits_10() {
    ippcode()
        .assert()
        .failure()
        .code(10)
        .stderr(predicate::str::contains("Usage: ippcode"));
}

#[test]
fn help_flag_exits_0() {
    ippcode()
        .arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::contains("run <source>"));
}

#[test]
fn unknown_command_exits_10() {
    ippcode()
        .arg("frobnicate")
        .assert()
        .code(10)
        .stderr(predicate::str::contains("unknown command 'frobnicate'"));
}

#[test]
fn run_without_source_exits_10() {
    ippcode().arg("run").assert().code(10);
}

#[test]
fn missing_source_file_exits_11() {
    ippcode()
        .args(["run", "/nonexistent/program.ippcode"])
        .assert()
        .code(11)
        .stderr(predicate::str::contains("cannot read"));
}

// ---- run ----

#[test]
fn run_hello() {
    ippcode()
        .arg("run")
        .arg(test_program("hello.ippcode"))
        .assert()
        .success()
        .stdout("Hello, world!\n");
}

#[test]
fn run_factorial_from_stdin_input() {
    ippcode()
        .arg("run")
        .arg(test_program("factorial.ippcode"))
        .write_stdin("5\n")
        .assert()
        .success()
        .stdout("120\n");
}

#[test]
fn run_with_input_file() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "input.txt", "6\n");
    ippcode()
        .arg("run")
        .arg(test_program("factorial.ippcode"))
        .arg("--input")
        .arg(&input)
        .assert()
        .success()
        .stdout("720\n");
}

#[test]
fn missing_input_file_exits_11() {
    ippcode()
        .arg("run")
        .arg(test_program("factorial.ippcode"))
        .args(["--input", "/nonexistent/input.txt"])
        .assert()
        .code(11);
}

#[test]
fn run_strings_program() {
    ippcode()
        .arg("run")
        .arg(test_program("strings.ippcode"))
        .write_stdin("héllo\n")
        .assert()
        .success()
        .stdout("5 h 104 *éllo\n");
}

#[test]
fn exit_instruction_sets_process_code() {
    ippcode()
        .arg("run")
        .arg(test_program("exit_code.ippcode"))
        .assert()
        .code(7)
        .stdout("");
}

#[test]
fn runtime_error_exit_code() {
    ippcode()
        .arg("run")
        .arg(test_program("div_zero.ippcode"))
        .assert()
        .code(57)
        .stderr(predicate::str::contains("division by zero"));
}

#[test]
fn source_from_stdin() {
    ippcode()
        .args(["run", "-"])
        .write_stdin(".IPPcode24\nWRITE int@0x2A\n")
        .assert()
        .success()
        .stdout("42");
}

#[test]
fn output_before_error_is_kept() {
    let dir = TempDir::new().unwrap();
    let source = write_source(
        &dir,
        "partial.ippcode",
        ".IPPcode24\nWRITE string@before\nWRITE GF@missing\n",
    );
    ippcode()
        .arg("run")
        .arg(&source)
        .assert()
        .code(54)
        .stdout("before");
}

// ---- Source errors ----

#[test]
fn missing_header_exits_21() {
    ippcode()
        .arg("run")
        .arg(test_program("no_header.ippcode"))
        .assert()
        .code(21)
        .stdout("");
}

#[test]
fn syntax_error_exits_23() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "bad.ippcode", ".IPPcode24\nMOVE GF@x\n");
    ippcode()
        .arg("check")
        .arg(&source)
        .assert()
        .code(23)
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn duplicate_label_exits_52() {
    ippcode()
        .arg("check")
        .arg(test_program("duplicate_label.ippcode"))
        .assert()
        .code(52);
}

// ---- check / list ----

#[test]
fn check_reports_counts() {
    ippcode()
        .arg("check")
        .arg(test_program("factorial.ippcode"))
        .assert()
        .success()
        .stdout(predicate::str::contains("26 instructions, 2 labels"));
}

#[test]
fn list_indexed() {
    ippcode()
        .arg("list")
        .arg(test_program("exit_code.ippcode"))
        .assert()
        .success()
        .stdout(predicate::str::contains("    0      1  DEFVAR GF@code"))
        .stdout(predicate::str::contains("    3      4  EXIT GF@code"));
}

#[test]
fn list_rejects_extra_arguments() {
    ippcode()
        .arg("list")
        .arg(test_program("hello.ippcode"))
        .arg("--verbose")
        .assert()
        .code(10);
}

#[test]
fn list_source_reassembles() {
    let listed = ippcode()
        .arg("list")
        .arg(test_program("factorial.ippcode"))
        .arg("--source")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(listed).unwrap();
    assert!(text.starts_with(".IPPcode24\nDEFVAR GF@n\nREAD GF@n int\n"));

    let dir = TempDir::new().unwrap();
    let relisted = write_source(&dir, "relisted.ippcode", &text);
    ippcode()
        .arg("run")
        .arg(&relisted)
        .write_stdin("4\n")
        .assert()
        .success()
        .stdout("24\n");
}

#[test]
fn debug_logging_goes_to_stderr() {
    ippcode()
        .arg("run")
        .arg(test_program("hello.ippcode"))
        .env("RUST_LOG", "debug")
        .assert()
        .success()
        .stdout("Hello, world!\n")
        .stderr(predicate::str::contains("run started"));
}
