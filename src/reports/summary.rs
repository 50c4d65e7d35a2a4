//! Ledger summary
//!
//! Counts, date span, the distinct categories/years/types present, a
//! per-year income and expense breakdown and the change between years.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Category, Money, TransactionType};
use crate::services::{DateRange, Ledger};

/// Per-year totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct YearBreakdown {
    pub transactions: usize,
    pub total_income: Money,
    pub total_expenses: Money,
}

impl YearBreakdown {
    pub fn net_profit(&self) -> Money {
        self.total_income - self.total_expenses
    }
}

/// Percent change of each total from one year to another
///
/// A change is `None` when the earlier year's figure is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearOverYear {
    pub from: i32,
    pub to: i32,
    pub income_change: Option<f64>,
    pub expenses_change: Option<f64>,
    pub net_profit_change: Option<f64>,
}

impl YearOverYear {
    pub fn between(from: (i32, &YearBreakdown), to: (i32, &YearBreakdown)) -> Self {
        let (from_year, base) = from;
        let (to_year, current) = to;
        Self {
            from: from_year,
            to: to_year,
            income_change: percent_change(base.total_income, current.total_income),
            expenses_change: percent_change(base.total_expenses, current.total_expenses),
            net_profit_change: percent_change(base.net_profit(), current.net_profit()),
        }
    }
}

/// Measured against the magnitude of the base, so a loss shrinking to a
/// smaller loss reads as an improvement
fn percent_change(base: Money, current: Money) -> Option<f64> {
    if base.is_zero() {
        None
    } else {
        Some((current - base).as_f64() / base.abs().as_f64() * 100.0)
    }
}

fn format_change(change: Option<f64>) -> String {
    match change {
        Some(pct) => format!("{:+.1}%", pct),
        None => "n/a".to_string(),
    }
}

/// Summary statistics of a ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub total_transactions: usize,
    /// `None` for an empty ledger
    pub date_range: Option<DateRange>,
    /// Distinct categories, sorted by label
    pub categories: Vec<Category>,
    pub years: Vec<i32>,
    /// Distinct transaction types, sorted by label
    pub transaction_types: Vec<TransactionType>,
    pub year_breakdown: BTreeMap<i32, YearBreakdown>,
}

impl LedgerSummary {
    /// Summarize a ledger
    pub fn generate(ledger: &Ledger) -> Self {
        let mut categories = BTreeSet::new();
        let mut types = BTreeSet::new();
        let mut year_breakdown: BTreeMap<i32, YearBreakdown> = BTreeMap::new();

        for entry in ledger {
            let txn = &entry.transaction;
            categories.insert(txn.category);
            types.insert(txn.kind);

            let year = year_breakdown.entry(txn.year).or_default();
            year.transactions += 1;
            match txn.kind {
                TransactionType::Income => year.total_income += txn.amount,
                TransactionType::Expense => year.total_expenses += txn.amount,
            }
        }

        let mut categories: Vec<Category> = categories.into_iter().collect();
        categories.sort_by_key(|c| c.label());
        let mut transaction_types: Vec<TransactionType> = types.into_iter().collect();
        transaction_types.sort_by_key(|t| t.label());

        Self {
            total_transactions: ledger.len(),
            date_range: ledger.date_range(),
            categories,
            years: year_breakdown.keys().copied().collect(),
            transaction_types,
            year_breakdown,
        }
    }

    /// Change from one year to another; `None` unless both years are present
    pub fn year_over_year(&self, from: i32, to: i32) -> Option<YearOverYear> {
        let base = self.year_breakdown.get(&from)?;
        let current = self.year_breakdown.get(&to)?;
        Some(YearOverYear::between((from, base), (to, current)))
    }

    pub fn category_labels(&self) -> Vec<&'static str> {
        self.categories.iter().map(Category::label).collect()
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str("Ledger Summary\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Total transactions: {}\n", self.total_transactions));
        if let Some(range) = &self.date_range {
            output.push_str(&format!("Date range:         {} to {}\n", range.start, range.end));
        }
        output.push_str(&format!(
            "Categories:         {}\n",
            self.category_labels().join(", ")
        ));
        output.push_str(&format!(
            "Years:              {}\n",
            self.years
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ));

        for (year, breakdown) in &self.year_breakdown {
            output.push_str(&format!("\n{} Summary:\n", year));
            output.push_str(&format!("  Transactions: {}\n", breakdown.transactions));
            output.push_str(&format!(
                "  Income:       {}\n",
                breakdown.total_income.format_with_symbol(currency)
            ));
            output.push_str(&format!(
                "  Expenses:     {}\n",
                breakdown.total_expenses.format_with_symbol(currency)
            ));
            output.push_str(&format!(
                "  Net Profit:   {}\n",
                breakdown.net_profit().format_with_symbol(currency)
            ));
        }

        for pair in self.years.windows(2) {
            if let Some(change) = self.year_over_year(pair[0], pair[1]) {
                output.push_str(&format!("\nChange {} to {}:\n", change.from, change.to));
                output.push_str(&format!(
                    "  Income:       {}\n",
                    format_change(change.income_change)
                ));
                output.push_str(&format!(
                    "  Expenses:     {}\n",
                    format_change(change.expenses_change)
                ));
                output.push_str(&format!(
                    "  Net Profit:   {}\n",
                    format_change(change.net_profit_change)
                ));
            }
        }

        output
    }
}
