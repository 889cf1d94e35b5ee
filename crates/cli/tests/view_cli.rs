//! End-to-end CLI tests driving the compiled `tally` binary.

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::tempdir;

const LEDGER: &str = "\
Method,PaymentRef,Account,Date,Amount,Tip,Paid
Card (Visa),PAY-001,Front desk,2025-04-21,10.00,1.00,11.00
Card (Visa),PAY-002,Front desk,2025-04-21,20.00,0.00,20.00
";

const PROCESSOR_CLEAN: &str = "\
Channel,Payment ID,Card last 4,Date,Amount,Gratuity amount,Refunded amount,Surcharge amount,Status
Terminal,PAY-001,4242,2025-04-21,11.00,1.00,0,0,Approved
Terminal,PAY-002,1881,2025-04-21,20.00,0.00,0,0,Approved
";

const PROCESSOR_OFF_BY_FIVE: &str = "\
Channel,Payment ID,Card last 4,Date,Amount,Gratuity amount,Refunded amount,Surcharge amount,Status
Terminal,PAY-001,4242,2025-04-21,11.00,1.00,0,0,Approved
Terminal,PAY-002,1881,2025-04-21,20.05,0.00,0,0,Approved
";

fn write_pair(dir: &Path, processor: &str) -> (String, String) {
    let left = dir.join("ledger.csv");
    let right = dir.join("processor.csv");
    fs::write(&left, LEDGER).unwrap();
    fs::write(&right, processor).unwrap();
    (
        left.to_string_lossy().into_owned(),
        right.to_string_lossy().into_owned(),
    )
}

fn tally() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tally"))
}

#[test]
fn clean_reconciliation_passes_check() {
    let dir = tempdir().unwrap();
    let (left, right) = write_pair(dir.path(), PROCESSOR_CLEAN);

    let output = tally()
        .args(["view", &left, &right, "--check"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn mismatch_fails_check_with_exit_10() {
    let dir = tempdir().unwrap();
    let (left, right) = write_pair(dir.path(), PROCESSOR_OFF_BY_FIVE);

    let output = tally()
        .args(["view", &left, &right, "--check"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(10));
}

#[test]
fn mismatch_without_check_exits_zero() {
    let dir = tempdir().unwrap();
    let (left, right) = write_pair(dir.path(), PROCESSOR_OFF_BY_FIVE);

    let output = tally().args(["view", &left, &right]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("20.05!"), "flagged cell missing: {stdout}");
}

#[test]
fn json_report_is_well_formed() {
    let dir = tempdir().unwrap();
    let (left, right) = write_pair(dir.path(), PROCESSOR_OFF_BY_FIVE);

    let output = tally()
        .args(["view", &left, &right, "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["summary"]["positions"], 2);
    assert_eq!(report["summary"]["amount_mismatches"], 1);
}

#[test]
fn filter_flag_restricts_rows() {
    let dir = tempdir().unwrap();
    let (left, right) = write_pair(dir.path(), PROCESSOR_CLEAN);

    // "Online" matches no channel: the right panel renders no data rows
    let output = tally()
        .args(["view", &left, &right, "--filter-right", "Online"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("4242"), "right rows should be filtered out: {stdout}");
}

#[test]
fn columns_lists_distinct_values() {
    let dir = tempdir().unwrap();
    let (left, _) = write_pair(dir.path(), PROCESSOR_CLEAN);

    let output = tally()
        .args(["columns", &left, "--side", "left"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "Card");
}

#[test]
fn missing_file_exits_one() {
    let output = tally()
        .args(["view", "/nonexistent/a.csv", "/nonexistent/b.csv"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn bad_date_flag_is_usage_error() {
    let dir = tempdir().unwrap();
    let (left, right) = write_pair(dir.path(), PROCESSOR_CLEAN);

    let output = tally()
        .args(["view", &left, &right, "--date", "21.04.2025"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}
