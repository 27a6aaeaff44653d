//! Integration tests for the atm-ledger CLI.
//!
//! These tests run the actual binary against script files written to a
//! temporary directory.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Writes `contents` to a file inside `dir` and returns its path.
fn write_script(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

/// Run the binary with the given arguments and return stdout
fn run_ledger(args: &[&str]) -> String {
    let mut cmd = Command::cargo_bin("atm-ledger").unwrap();
    let assert = cmd.args(args).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

#[test]
fn test_demo_without_arguments() {
    let output = run_ledger(&[]);
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(
        lines,
        [
            "account,holder,kind,balance,transactions",
            "CA456,Rahul,current,-5000.00,3",
            "SA123,Amit,savings,4000.00,2",
        ]
    );
}

#[test]
fn test_script_file() {
    let dir = TempDir::new().unwrap();
    let script = write_script(
        &dir,
        "ops.csv",
        "op, account, holder, amount
savings, S1, Asha, 1200
current, C1, Ravi, 0
withdraw, S1, , 200
withdraw, S1, , 0.01
withdraw, C1, , 5000
deposit, C1, , 12.5
",
    );

    let output = run_ledger(&[&script]);
    assert!(output.contains("C1,Ravi,current,-4987.50,2"));
    assert!(output.contains("S1,Asha,savings,1000.00,1"));
}

#[test]
fn test_history_flag_uses_sequential_ids() {
    let dir = TempDir::new().unwrap();
    let script = write_script(
        &dir,
        "ops.csv",
        "op,account,holder,amount\nsavings,S1,Asha,5000\ndeposit,S1,,10\n",
    );

    let output = run_ledger(&[&script, "--history", "--sequential"]);
    assert!(output.contains("account,id,timestamp,amount,kind"));
    assert!(output.contains("S1,S1-000001,"));
    assert!(output.contains(",10.00,Deposit"));
}

#[test]
fn test_journal_records_only_accepted_operations() {
    let dir = TempDir::new().unwrap();
    let script = write_script(
        &dir,
        "ops.csv",
        "op,account,holder,amount\nsavings,S1,Asha,5000\nwithdraw,S1,,4500\nwithdraw,S1,,4000\n",
    );
    let journal = dir.path().join("journal.csv");
    let journal_arg = journal.to_string_lossy().into_owned();

    run_ledger(&[&script, "--journal", &journal_arg, "--sequential"]);

    let contents = fs::read_to_string(&journal).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "id,timestamp,amount,kind");
    assert!(lines[1].starts_with("S1-000001,"));
    assert!(lines[1].ends_with(",4000.00,Withdraw"));
}

#[test]
fn test_bad_rows_are_skipped() {
    let dir = TempDir::new().unwrap();
    let script = write_script(
        &dir,
        "ops.csv",
        "op,account,holder,amount
current,C1,Ravi,10
deposit,C1,,abc
transfer,C1,,5
deposit,C9,,5
deposit,C1,,5
",
    );

    let output = run_ledger(&[&script]);
    assert!(output.contains("C1,Ravi,current,15.00,1"));
}

#[test]
fn test_out_of_range_withdrawal_is_skipped() {
    let dir = TempDir::new().unwrap();
    let script = write_script(
        &dir,
        "ops.csv",
        "op,account,holder,amount
current,C1,Ravi,-4000
withdraw,C1,,79228162514264337593543950335
deposit,C1,,1
",
    );

    let output = run_ledger(&[&script]);
    assert!(output.contains("C1,Ravi,current,-3999.00,1"));
}

#[test]
fn test_missing_file_fails() {
    let mut cmd = Command::cargo_bin("atm-ledger").unwrap();
    cmd.arg("does-not-exist.csv")
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn test_unexpected_argument_fails() {
    let mut cmd = Command::cargo_bin("atm-ledger").unwrap();
    cmd.args(["a.csv", "b.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: atm-ledger"));
}
