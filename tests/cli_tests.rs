use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::{contains, diff};

fn ls8() -> Command {
    let mut cmd = Command::cargo_bin("ls8").unwrap();
    cmd.env_remove("LS8_TRACE").env_remove("LS8_MINIMAL");
    cmd
}

fn run_minimal(file: &str) -> Command {
    let mut cmd = ls8();
    cmd.arg(format!("tests/files/{file}")).arg("--minimal");
    cmd
}

#[test]
fn prints_eight() {
    run_minimal("print8.ls8")
        .assert()
        .success()
        .stdout(diff("8\nHalted\n"));
}

#[test]
fn multiplies() {
    run_minimal("mult.ls8")
        .assert()
        .success()
        .stdout(diff("72\nHalted\n"));
}

#[test]
fn pops_in_reverse() {
    run_minimal("stack.ls8")
        .assert()
        .success()
        .stdout(diff("3\n2\n1\nHalted\n"));
}

#[test]
fn returns_after_call() {
    run_minimal("call.ls8")
        .assert()
        .success()
        .stdout(diff("6\n12\nHalted\n"));
}

#[test]
fn branches_on_flags() {
    run_minimal("jeq.ls8")
        .assert()
        .success()
        .stdout(diff("1\n2\nHalted\n"));
}

#[test]
fn reports_progress() {
    ls8()
        .arg("tests/files/print8.ls8")
        .assert()
        .success()
        .stdout(contains("Loading"))
        .stdout(contains("8\n"))
        .stdout(contains("Halted"))
        .stdout(contains("Completed"));
}

#[test]
fn dumps_registers() {
    run_minimal("print8.ls8")
        .arg("--dump")
        .assert()
        .success()
        .stdout(contains("Halted\nR0 8\n"))
        .stdout(contains("R7 244\nPC 5\nSP 244\nFL 000\n"));
}

#[test]
fn traces_instructions() {
    run_minimal("print8.ls8")
        .arg("--trace")
        .assert()
        .success()
        .stdout(diff("8\nHalted\n"))
        .stderr(contains("TRACE: 00 | 82 00 08 | 00 00 00 00 00 00 00 F4 ; LDI R0, 8\n"))
        .stderr(contains("TRACE: 05 | 01 00 00 | 08 00 00 00 00 00 00 F4 ; HLT\n"));
}

#[test]
fn traces_from_environment() {
    run_minimal("print8.ls8")
        .env("LS8_TRACE", "1")
        .assert()
        .success()
        .stderr(contains("TRACE: 03 | 47 00 01"));
}

#[test]
fn minimal_from_environment() {
    ls8()
        .arg("tests/files/mult.ls8")
        .env("LS8_MINIMAL", "1")
        .assert()
        .success()
        .stdout(diff("72\nHalted\n"));
}

#[test]
fn usage_errors() {
    ls8().assert().code(1);
    ls8()
        .arg("tests/files/print8.ls8")
        .arg("tests/files/mult.ls8")
        .assert()
        .code(1);
    ls8().arg("--help").assert().success();
}

#[test]
fn file_not_found() {
    ls8()
        .arg("tests/files/missing.ls8")
        .assert()
        .code(2)
        .stderr(contains("missing.ls8"));
}

#[test]
fn malformed_image() {
    run_minimal("bad_literal.ls8")
        .assert()
        .code(3)
        .stdout(diff(""))
        .stderr(contains("Encountered an invalid binary literal"));
}

#[test]
fn division_by_zero() {
    run_minimal("div_zero.ls8")
        .assert()
        .code(4)
        .stdout(contains("Halted").not())
        .stderr(contains("Division by zero (at PC 0x06)"));
}

#[test]
fn unsupported_operation() {
    run_minimal("unsupported.ls8")
        .assert()
        .code(4)
        .stdout(diff(""))
        .stderr(contains("Unsupported operation `11111111` (at PC 0x03)"));
}
