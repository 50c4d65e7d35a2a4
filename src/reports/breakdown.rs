//! Category Breakdown
//!
//! Count and sum per (category, type), with each row's share of its type
//! total. Feeds the expense pie and the post-consolidation log.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, Money, TransactionType};
use crate::services::LedgerEntry;

/// One (category, type) group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Number of transactions
    pub count: usize,
    pub total: Money,
    /// Percentage of all amounts of the same type
    pub share: f64,
}

/// Running totals of one group while scanning
struct Group {
    category: Category,
    kind: TransactionType,
    count: usize,
    total: Money,
}

/// Category breakdown report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    /// Sorted by category label, then type label
    pub rows: Vec<BreakdownRow>,
    pub total_income: Money,
    pub total_expenses: Money,
}

impl CategoryBreakdown {
    /// Group entries by category and type
    pub fn generate<'a>(entries: impl IntoIterator<Item = &'a LedgerEntry>) -> Self {
        // Keyed by label so rows sort by category name, then type name
        let mut groups: BTreeMap<(&'static str, &'static str), Group> = BTreeMap::new();
        let mut total_income = Money::zero();
        let mut total_expenses = Money::zero();

        for entry in entries {
            let txn = &entry.transaction;
            let group = groups
                .entry((txn.category.label(), txn.kind.label()))
                .or_insert_with(|| Group {
                    category: txn.category,
                    kind: txn.kind,
                    count: 0,
                    total: Money::zero(),
                });
            group.count += 1;
            group.total += txn.amount;

            match txn.kind {
                TransactionType::Income => total_income += txn.amount,
                TransactionType::Expense => total_expenses += txn.amount,
            }
        }

        let rows = groups
            .into_values()
            .map(|group| {
                let type_total = match group.kind {
                    TransactionType::Income => total_income,
                    TransactionType::Expense => total_expenses,
                };
                BreakdownRow {
                    category: group.category,
                    kind: group.kind,
                    count: group.count,
                    total: group.total,
                    share: group.total.percent_of(type_total),
                }
            })
            .collect();

        Self {
            rows,
            total_income,
            total_expenses,
        }
    }

    /// Rows of a single type
    pub fn rows_of(&self, kind: TransactionType) -> impl Iterator<Item = &BreakdownRow> {
        self.rows.iter().filter(move |r| r.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str("Category Breakdown\n");
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<22} {:<8} {:>7} {:>24} {:>8}\n",
            "Category", "Type", "Count", "Total", "Share"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<22} {:<8} {:>7} {:>24} {:>7.1}%\n",
                row.category,
                row.kind,
                row.count,
                row.total.format_with_symbol(currency),
                row.share
            ));
        }

        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<38} {:>24}\n",
            "TOTAL INCOME",
            self.total_income.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<38} {:>24}\n",
            "TOTAL EXPENSES",
            self.total_expenses.format_with_symbol(currency)
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Category", "Type", "Count", "Total", "Share"])?;

        for row in &self.rows {
            csv.write_record([
                row.category.label().to_string(),
                row.kind.label().to_string(),
                row.count.to_string(),
                format!("{:.2}", row.total.as_f64()),
                format!("{:.2}", row.share),
            ])?;
        }

        csv.flush()
            .map_err(|e| LedgerError::Export(e.to_string()))?;
        Ok(())
    }
}
