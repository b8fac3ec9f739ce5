//! Integration tests for the qif2csv CLI.
//!
//! These tests run the actual binary against the QIF fixtures in
//! `tests/data` and compare its output with the expected CSV files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

/// Get path to test data file
fn test_data_path(filename: &str) -> String {
    format!("tests/data/{}", filename)
}

/// Run the binary with the given input and return stdout
fn run_converter(input: &str) -> String {
    let mut cmd = Command::cargo_bin("qif2csv").unwrap();
    let assert = cmd.arg(input).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

#[test]
fn test_bank_file_matches_expected() {
    let output = run_converter(&test_data_path("bank.qif"));
    let expected = fs::read_to_string(test_data_path("expected_bank.csv")).unwrap();

    assert_eq!(output, expected);
}

#[test]
fn test_edge_cases_file_matches_expected() {
    let output = run_converter(&test_data_path("edge.qif"));
    let expected = fs::read_to_string(test_data_path("expected_edge.csv")).unwrap();

    assert_eq!(output, expected);
}

#[test]
fn test_output_has_correct_header() {
    let output = run_converter(&test_data_path("bank.qif"));
    assert!(output.starts_with("date,reference,note,amount\n"));
}

#[test]
fn test_amounts_have_two_decimal_places() {
    let output = run_converter(&test_data_path("bank.qif"));

    for line in output.lines().skip(1) {
        let amount = line.rsplit(',').next().unwrap();
        let dot_pos = amount.find('.').expect("amount has a decimal point");
        assert_eq!(amount.len() - dot_pos - 1, 2, "Expected 2 decimal places in: {}", amount);
    }
}

#[test]
fn test_output_file_option() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.csv");

    Command::cargo_bin("qif2csv")
        .unwrap()
        .arg(test_data_path("bank.qif"))
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let expected = fs::read_to_string(test_data_path("expected_bank.csv")).unwrap();
    assert_eq!(fs::read_to_string(&out).unwrap(), expected);
}

#[test]
fn test_unwritable_output_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("missing-dir").join("out.csv");

    Command::cargo_bin("qif2csv")
        .unwrap()
        .arg(test_data_path("bank.qif"))
        .arg("-o")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to create output"))
        .stderr(predicate::str::contains("out.csv"));
}

#[test]
fn test_directory_mode_concatenates_sorted_sources() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("2024");
    let hidden = dir.path().join(".backup");
    fs::create_dir(&nested).unwrap();
    fs::create_dir(&hidden).unwrap();
    fs::write(dir.path().join("a.qif"), "!Type:Bank\nNfrom-a\n^\n").unwrap();
    fs::write(nested.join("b.qif"), "!Type:Bank\nNfrom-b\n^\n").unwrap();
    fs::write(hidden.join("c.qif"), "!Type:Bank\nNfrom-hidden\n^\n").unwrap();
    fs::write(dir.path().join("readme.txt"), "not qif").unwrap();

    let output = run_converter(dir.path().to_str().unwrap());

    assert_eq!(
        output,
        "date,reference,note,amount\n,from-b,,\n,from-a,,\n"
    );
}

#[test]
fn test_empty_directory_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_converter(dir.path().to_str().unwrap());
    assert_eq!(output, "date,reference,note,amount\n");
}

#[test]
fn test_missing_header_error() {
    let mut cmd = Command::cargo_bin("qif2csv").unwrap();
    cmd.arg(test_data_path("no_header.qif"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid QIF header"))
        .stderr(predicate::str::contains("no_header.qif"));
}

#[test]
fn test_bad_date_keeps_earlier_rows() {
    let mut cmd = Command::cargo_bin("qif2csv").unwrap();
    cmd.arg(test_data_path("bad_date.qif"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("2023-01-01T00:00:00Z,,,5.00"))
        .stdout(predicate::str::contains("6.00").not())
        .stderr(predicate::str::contains("invalid date '31/13/2023' at line 5"));
}

#[test]
fn test_bad_amount_error() {
    let mut cmd = Command::cargo_bin("qif2csv").unwrap();
    cmd.arg(test_data_path("bad_amount.qif"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid amount 'abc'"));
}

#[test]
fn test_continue_on_error_skips_bad_sources() {
    let dir = tempfile::tempdir().unwrap();
    fs::copy(test_data_path("bad_amount.qif"), dir.path().join("a.qif")).unwrap();
    fs::copy(test_data_path("bank.qif"), dir.path().join("b.qif")).unwrap();

    let expected = fs::read_to_string(test_data_path("expected_bank.csv")).unwrap();

    Command::cargo_bin("qif2csv")
        .unwrap()
        .arg("--continue-on-error")
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::diff(expected))
        .stderr(predicate::str::contains("Skipped 1 of 2 sources"));
}

#[test]
fn test_missing_file_error() {
    let mut cmd = Command::cargo_bin("qif2csv").unwrap();
    cmd.arg("nonexistent.qif")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nonexistent.qif: read failure"));
}

#[test]
fn test_missing_argument_error() {
    let mut cmd = Command::cargo_bin("qif2csv").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
