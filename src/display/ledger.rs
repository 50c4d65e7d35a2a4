//! Ledger listing
//!
//! Renders ledger entries as a table.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use super::report::truncate;
use crate::services::LedgerEntry;

#[derive(Tabled)]
struct LedgerRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Year")]
    year: i32,
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Details")]
    details: String,
}

impl LedgerRow {
    fn from_entry(entry: &LedgerEntry, currency: &str) -> Self {
        let txn = &entry.transaction;
        Self {
            date: txn.date.format("%Y-%m-%d").to_string(),
            year: txn.year,
            category: txn.category.label(),
            kind: txn.kind.label(),
            amount: txn.amount.format_with_symbol(currency),
            details: truncate(&txn.details, 40),
        }
    }
}

/// Format entries as a table, newest first, at most `limit` rows
pub fn format_ledger_table(entries: &[&LedgerEntry], currency: &str, limit: Option<usize>) -> String {
    if entries.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| b.transaction.date.cmp(&a.transaction.date));

    let shown = limit.unwrap_or(sorted.len()).min(sorted.len());
    let rows: Vec<LedgerRow> = sorted[..shown]
        .iter()
        .map(|e| LedgerRow::from_entry(e, currency))
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::single(4), Alignment::right());

    let mut output = table.to_string();
    output.push('\n');
    if shown < entries.len() {
        output.push_str(&format!("Showing {} of {} transactions\n", shown, entries.len()));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, Transaction, TransactionType};
    use crate::services::Ledger;
    use chrono::NaiveDate;

    fn ledger() -> Ledger {
        let txn = |d: u32, units: i64, details: &str| {
            Transaction::dated(
                NaiveDate::from_ymd_opt(2025, 1, d).unwrap(),
                Money::from_units(units),
                Category::Labour,
                TransactionType::Expense,
                details,
            )
        };
        Ledger::from_transactions(vec![
            txn(2, 1500, "casual wages"),
            txn(9, 2500, "weekly wages"),
            txn(5, 900, "overtime"),
        ])
    }

    #[test]
    fn test_table_lists_newest_first() {
        let ledger = ledger();
        let entries: Vec<_> = ledger.iter().collect();
        let output = format_ledger_table(&entries, "KES ", None);

        let weekly = output.find("weekly wages").unwrap();
        let casual = output.find("casual wages").unwrap();
        assert!(weekly < casual);
        assert!(output.contains("KES 2,500.00"));
        assert!(output.contains("Labour"));
    }

    #[test]
    fn test_limit() {
        let ledger = ledger();
        let entries: Vec<_> = ledger.iter().collect();
        let output = format_ledger_table(&entries, "", Some(1));

        assert!(output.contains("weekly wages"));
        assert!(!output.contains("overtime"));
        assert!(output.contains("Showing 1 of 3 transactions"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(format_ledger_table(&[], "", None), "No transactions found.\n");
    }
}
