//! CSV Export functionality
//!
//! Writes ledger entries in the standard column layout.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::services::LedgerEntry;

/// Column headers of the ledger export
pub const LEDGER_HEADERS: [&str; 8] = [
    "Date", "Amount", "Year", "Category", "Type", "Details", "Month", "Quarter",
];

/// Export ledger entries to CSV
pub fn export_ledger_csv<'a, W: Write>(
    entries: impl IntoIterator<Item = &'a LedgerEntry>,
    writer: W,
) -> LedgerResult<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(LEDGER_HEADERS)?;

    let mut count = 0;
    for entry in entries {
        let txn = &entry.transaction;
        csv.write_record([
            txn.date.format("%Y-%m-%d").to_string(),
            format!("{:.2}", txn.amount.as_f64()),
            txn.year.to_string(),
            txn.category.label().to_string(),
            txn.kind.label().to_string(),
            txn.details.clone(),
            entry.month.to_string(),
            entry.quarter.to_string(),
        ])?;
        count += 1;
    }

    csv.flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OfficialFigures;
    use crate::services::Ledger;

    #[test]
    fn test_export_ledger_csv() {
        let ledger = Ledger::from_transactions(OfficialFigures::FY2024.to_transactions().unwrap());
        let mut buffer = Vec::new();
        let count = export_ledger_csv(&ledger, &mut buffer).unwrap();
        assert_eq!(count, 6);

        let output = String::from_utf8(buffer).unwrap();
        let mut lines = output.lines();
        assert_eq!(
            lines.next(),
            Some("Date,Amount,Year,Category,Type,Details,Month,Quarter")
        );
        assert_eq!(
            lines.next(),
            Some("2024-12-31,22619122.00,2024,Sales,Income,Total Sales Revenue (Official P&L),2024-12,2024Q4")
        );
        assert!(output.contains("163557.65,2024,Transaction Costs,Expense"));
    }

    #[test]
    fn test_details_are_quoted() {
        use crate::models::{Category, Money, Transaction, TransactionType};
        use chrono::NaiveDate;

        let ledger = Ledger::from_transactions(vec![Transaction::dated(
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            Money::from_units(10),
            Category::OtherExpenses,
            TransactionType::Expense,
            "stationery, \"A4\"",
        )]);
        let mut buffer = Vec::new();
        export_ledger_csv(&ledger, &mut buffer).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("\"stationery, \"\"A4\"\"\""));
    }
}
