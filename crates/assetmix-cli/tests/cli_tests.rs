//! End-to-end tests for the assetmix binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const EXPORT: &str = "\
Asset Allocation,,,,,,,,,,
Symbol,Description,Account,Domestic Stock,Foreign Stock,Bonds,Short_term,Unknown,Other,Convertibles,Preferred
FXAIX,FIDELITY 500 INDEX,Z11111234,\"$300,000.00\",,,,,,,
SPAXX**,HELD IN MONEY MARKET,Z11111234,,,,\"$100,000.00\",,,,
FSPSX,FIDELITY INTL INDEX,Z22225678,,\"$100,000.00\",\"$50,000.00\",\"$50,000.00\",,,,
\"Date downloaded 03/09/2024. For informational purposes only.\"
";

const CONFIG: &str = r#"{
    "excel_filename": "AssetAllocation.csv",
    "cash_symbols": ["SPAXX**"],
    "account_nicknames": { "*1234": "Roth IRA" }
}"#;

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("AssetAllocation.csv"), EXPORT).unwrap();
    fs::write(dir.path().join("config.json"), CONFIG).unwrap();
    dir
}

fn assetmix(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("assetmix").unwrap();
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("ASSETMIX_CONFIG")
        .arg("--config")
        .arg(dir.join("config.json"));
    cmd
}

// =============================================================================
// Analyze
// =============================================================================

#[test]
fn test_analyze_all_accounts() {
    let dir = workspace();

    assetmix(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Analyzing all accounts"))
        .stdout(predicate::str::contains("Detailed Allocation Summary"))
        .stdout(predicate::str::contains("$600,000.00"))
        .stdout(predicate::str::contains("50.00%"))
        .stdout(predicate::str::contains("Detailed Allocation Minus Cash"))
        .stdout(predicate::str::contains("$500,000.00"))
        .stdout(predicate::str::contains("Cash or Short-Term"))
        .stdout(predicate::str::contains("Roth IRA"))
        .stdout(predicate::str::contains("Available Accounts"))
        .stdout(predicate::str::contains("Example: assetmix --account \"*1234\""));
}

#[test]
fn test_analyze_single_account() {
    let dir = workspace();

    assetmix(dir.path())
        .args(["analyze", "--account", "*5678"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Analyzing account: *5678"))
        .stdout(predicate::str::contains("$200,000.00"))
        .stdout(predicate::str::contains("FSPSX"));
}

#[test]
fn test_unknown_account_warns_and_succeeds() {
    let dir = workspace();

    assetmix(dir.path())
        .args(["--account", "*0000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No holdings match").not())
        .stderr(predicate::str::contains("No holdings match account *0000"))
        .stdout(predicate::str::contains("$0.00"));

    let history = fs::read_to_string(dir.path().join("history.log")).unwrap();
    assert!(history.contains("Warning: No holdings match account *0000"));
}

#[test]
fn test_quiet_drops_banner() {
    let dir = workspace();

    assetmix(dir.path())
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::contains("Analyzing all accounts").not())
        .stdout(predicate::str::contains("Detailed Allocation Summary"));
}

#[test]
fn test_json_output() {
    let dir = workspace();

    let output = assetmix(dir.path())
        .args(["--format", "json", "--account", "*1234"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["account_selector"], "*1234");
    assert_eq!(json["all_holdings"]["grand_total"].as_f64(), Some(400_000.0));
    assert_eq!(json["excluding_cash"]["grand_total"].as_f64(), Some(300_000.0));
    assert_eq!(json["excluding_cash"]["excluded_symbols"][0], "SPAXX**");
}

#[test]
fn test_csv_output() {
    let dir = workspace();

    assetmix(dir.path())
        .args(["--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("view,category,dollars,percentage"))
        .stdout(predicate::str::contains("all_holdings,Domestic Stock,300000.00,50.00"))
        .stdout(predicate::str::contains("excluding_cash_rollup,Stock,400000.00,80.00"));
}

#[test]
fn test_report_is_written() {
    let dir = workspace();
    let report = dir.path().join("allocation.md");

    assetmix(dir.path())
        .args(["--report", "allocation.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written to allocation.md"));

    let content = fs::read_to_string(report).unwrap();
    assert!(content.starts_with("# Asset Allocation Report"));
    assert!(content.contains("## Stock / Cash / Other Minus Cash"));
    assert!(content.contains("$500,000.00"));
}

#[test]
fn test_json_output_with_report_stays_parseable() {
    let dir = workspace();

    let output = assetmix(dir.path())
        .args(["--format", "json", "--report", "r.md"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["all_holdings"]["grand_total"].as_f64(), Some(600_000.0));
    assert!(dir.path().join("r.md").exists());
}

#[test]
fn test_summary_shows_class_columns() {
    let dir = workspace();

    assetmix(dir.path())
        .args(["--account", "*5678", "--no-history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Foreign Stock"))
        .stdout(predicate::str::contains("$100,000.00"))
        .stdout(predicate::str::contains("$50,000.00"));
}

// =============================================================================
// History
// =============================================================================

#[test]
fn test_history_is_appended() {
    let dir = workspace();
    let history = dir.path().join("history.log");

    assetmix(dir.path()).assert().success();
    let first = fs::read_to_string(&history).unwrap();
    assert!(first.lines().any(|l| l.ends_with(" Analyzing all accounts")));

    let stamp = &first.lines().next().unwrap()[..19];
    assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").is_ok());

    assetmix(dir.path()).assert().success();
    let second = fs::read_to_string(&history).unwrap();
    assert_eq!(second.lines().count(), 2 * first.lines().count());
}

#[test]
fn test_no_history_flag() {
    let dir = workspace();

    assetmix(dir.path()).arg("--no-history").assert().success();
    assert!(!dir.path().join("history.log").exists());
}

// =============================================================================
// Accounts and config
// =============================================================================

#[test]
fn test_accounts_listing() {
    let dir = workspace();

    assetmix(dir.path())
        .args(["accounts", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("account,nickname,holdings"))
        .stdout(predicate::str::contains("Z11111234,Roth IRA,2"))
        .stdout(predicate::str::contains("Z22225678,,1"));

    assert!(!dir.path().join("history.log").exists());
}

#[test]
fn test_config_show_json() {
    let dir = workspace();

    let output = assetmix(dir.path())
        .args(["config", "show", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["cash_symbols"][0], "SPAXX**");
    assert_eq!(json["account_match"], "suffix");
    assert_eq!(json["history_path"], "history.log");
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_missing_holdings_file() {
    let dir = workspace();

    assetmix(dir.path())
        .args(["--input", "missing.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_spreadsheet_input_rejected() {
    let dir = workspace();

    assetmix(dir.path())
        .args(["--input", "AssetAllocation.xlsx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported holdings file format"));
}

#[test]
fn test_invalid_amount_rejected() {
    let dir = workspace();
    fs::write(
        dir.path().join("bad.csv"),
        "Symbol,Description,Account,Bonds\nBND,TOTAL BOND,Z1,lots\n",
    )
    .unwrap();

    assetmix(dir.path())
        .args(["--input", "bad.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount 'lots' in row 2"));
}
