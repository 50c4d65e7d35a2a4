use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::{tempdir, TempDir};

fn bin(base: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ledger-report").expect("binary 'ledger-report' not found");
    cmd.env("LEDGER_REPORT_DIR", base)
        .env_remove("LEDGER_REPORT_WORKBOOK")
        .env_remove("LEDGER_REPORT_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn write_sheet(base: &Path, sheet: &str, contents: &str) {
    let dir = base.join("workbook");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{}.csv", sheet)), contents).unwrap();
}

fn sales_sheet(base: &Path) {
    write_sheet(
        base,
        "Sales",
        "Date,Value Date,Withdrawals,Amount,Details\n\
         2025-01-15,2025-01-15,,\"12,500.00\",Till takings\n\
         2025-02-03,2025-02-03,,8000,Till takings\n\
         not a date,,,100,ignored\n",
    );
}

/// A workbook with every standard sheet present
fn full_workbook() -> TempDir {
    let dir = tempdir().unwrap();
    let base = dir.path();

    sales_sheet(base);
    write_sheet(
        base,
        "Labour",
        "Tran Date,Withdrawals,Transaction Narrative\n15/01/2025,\"3,000.00\",Wages\n",
    );
    write_sheet(
        base,
        "rent",
        "No,Date,Amount,Ref,Details\n-,Paid on,Amount,,Narrative\n1,2025-01-01,15000,,January rent\n",
    );
    write_sheet(
        base,
        "Purchase of stock",
        "Tran Date,Deposits,Transaction Narrative\n2025-01-04,4200,Wholesaler\n",
    );
    write_sheet(
        base,
        "Utilities",
        "Tran Date,Withdrawals,Deposits,Transaction Narrative\n2025-01-20,1500,,Power\n2025-01-21,,,Nothing\n",
    );
    write_sheet(
        base,
        "Saving",
        "Tran Date,Deposits,Withdrawals,Transaction Narrative\n\
         2025-01-31,5000,,Chama deposit\n\
         2025-02-28,,2000,Emergency\n\
         2025-03-31,,,Empty\n",
    );
    write_sheet(
        base,
        "Expense",
        "Tran Date,Withdrawals,Transaction Narrative\n2025-02-10,750,Stationery\n",
    );

    dir
}

#[test]
fn test_shows_help() {
    let dir = tempdir().unwrap();
    bin(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_summary_of_full_workbook() {
    let dir = full_workbook();
    bin(dir.path())
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total transactions: 15"))
        .stdout(predicate::str::contains("Sales: 2 transactions"))
        .stdout(predicate::str::contains("Savings: 2 transactions"))
        .stdout(predicate::str::contains("Official P&L 2024: 6 transactions"))
        .stdout(predicate::str::contains("FAILED").not());
}

#[test]
fn test_missing_sheets_still_report() {
    let dir = tempdir().unwrap();
    sales_sheet(dir.path());

    bin(dir.path())
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total transactions: 8"))
        .stdout(predicate::str::contains("[FAIL] Labour: FAILED"))
        .stdout(predicate::str::contains("source(s) failed"));
}

#[test]
fn test_missing_column_fails_only_that_source() {
    let dir = full_workbook();
    write_sheet(
        dir.path(),
        "Labour",
        "Tran Date,Amount Paid,Transaction Narrative\n2025-01-15,3000,Wages\n",
    );

    bin(dir.path())
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total transactions: 14"))
        .stdout(predicate::str::contains("Labour: FAILED"))
        .stdout(predicate::str::contains("'Withdrawals'"));
}

#[test]
fn test_kpis_for_official_year() {
    let dir = full_workbook();
    bin(dir.path())
        .args(["kpis", "--year", "2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("KES 3,389,075.35"));
}

#[test]
fn test_kpis_for_filtered_subset() {
    let dir = full_workbook();
    bin(dir.path())
        .args(["kpis", "--year", "2025", "--category", "sales", "--type", "income"])
        .assert()
        .success()
        .stdout(predicate::str::contains("KES 20,500.00"))
        .stdout(predicate::str::contains("100.0%"));
}

#[test]
fn test_ledger_listing() {
    let dir = full_workbook();
    bin(dir.path())
        .args(["ledger", "--category", "Savings Withdrawal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Emergency"))
        .stdout(predicate::str::contains("Chama deposit").not());
}

#[test]
fn test_official_statement() {
    let dir = tempdir().unwrap();
    bin(dir.path())
        .arg("official")
        .assert()
        .success()
        .stdout(predicate::str::contains("GROSS PROFIT"))
        .stdout(predicate::str::contains("P&L Waterfall"));
}

#[test]
fn test_check_passes_when_sheets_are_a_later_year() {
    let dir = full_workbook();
    bin(dir.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Result: PASS"));
}

#[test]
fn test_check_fails_on_mismatch() {
    let dir = full_workbook();
    fs::write(dir.path().join("ledger-report.json"), r#"{ "book_year": 2024 }"#).unwrap();

    bin(dir.path())
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("MISMATCH"))
        .stderr(predicate::str::contains("disagree"));
}

#[test]
fn test_no_data_is_an_error() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("custom.json");
    fs::write(
        &config,
        r#"{ "official_figures": { "year": 2147483647, "sales": 0, "cogs": 0,
             "labour": 0, "rent": 0, "transport": 0, "transaction_costs": 0 } }"#,
    )
    .unwrap();

    bin(dir.path())
        .args(["summary", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No data could be loaded"))
        .stderr(predicate::str::contains("Sales"));
}

#[test]
fn test_export_json() {
    let dir = full_workbook();
    let output = dir.path().join("dashboard.json");

    bin(dir.path())
        .args(["export", "--format", "json", "--pretty", "--output"])
        .arg(&output)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["schema_version"], "1.0.0");
    assert_eq!(json["key_metrics"]["net_profit"], 338_907_535);
    assert_eq!(json["ledger"].as_array().unwrap().len(), 15);
    assert_eq!(json["sources"].as_array().unwrap().len(), 8);
}

#[test]
fn test_export_csv_to_default_location() {
    let dir = full_workbook();

    bin(dir.path())
        .args(["export", "--format", "csv", "--type", "expense", "--year", "2025"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 6 transactions"));

    let csv = fs::read_to_string(dir.path().join("output").join("ledger.csv")).unwrap();
    assert!(csv.starts_with("Date,Amount,Year,Category,Type,Details,Month,Quarter"));
    assert!(csv.contains("2025-02-28,2000.00,2025,Savings Withdrawal,Expense,Emergency,2025-02,2025Q1"));
    assert!(!csv.contains("Income"));
}

#[test]
fn test_workbook_flag_overrides_location() {
    let dir = full_workbook();
    let elsewhere = tempdir().unwrap();

    bin(elsewhere.path())
        .args(["summary", "--workbook"])
        .arg(dir.path().join("workbook"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Total transactions: 15"));
}

#[test]
fn test_config_init_writes_settings() {
    let dir = tempdir().unwrap();
    bin(dir.path())
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book year:       2025"))
        .stdout(predicate::str::contains("Purchase of stock").not())
        .stdout(predicate::str::contains("Stock Purchase"));

    let written = fs::read_to_string(dir.path().join("ledger-report.json")).unwrap();
    assert!(written.contains("\"load_policy\": \"any_source\""));
}
