//! Key performance indicators
//!
//! Income, expenses, net profit and profit margin over any subset of the
//! ledger.

use serde::{Deserialize, Serialize};

use crate::models::{Money, TransactionType};
use crate::services::LedgerEntry;

/// Headline figures for a set of ledger entries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub total_income: Money,
    pub total_expenses: Money,
    /// Income minus expenses; may be negative
    pub net_profit: Money,
    /// Net profit as a percentage of income, 0 when there is no income
    pub profit_margin: f64,
    pub transaction_count: usize,
}

impl Kpis {
    /// Calculate KPIs for the given entries
    pub fn calculate<'a>(entries: impl IntoIterator<Item = &'a LedgerEntry>) -> Self {
        let mut total_income = Money::zero();
        let mut total_expenses = Money::zero();
        let mut transaction_count = 0;

        for entry in entries {
            let txn = &entry.transaction;
            match txn.kind {
                TransactionType::Income => total_income += txn.amount,
                TransactionType::Expense => total_expenses += txn.amount,
            }
            transaction_count += 1;
        }

        let net_profit = total_income - total_expenses;
        let profit_margin = if total_income.is_positive() {
            net_profit.percent_of(total_income)
        } else {
            0.0
        };

        Self {
            total_income,
            total_expenses,
            net_profit,
            profit_margin,
            transaction_count,
        }
    }

    pub fn is_profitable(&self) -> bool {
        self.net_profit.is_positive()
    }

    /// Format the KPIs for terminal display
    pub fn format_terminal(&self, title: &str, currency: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", title));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<25} {:>30}\n",
            "Total Income:",
            self.total_income.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<25} {:>30}\n",
            "Total Expenses:",
            self.total_expenses.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<25} {:>30}\n",
            "Net Profit:",
            self.net_profit.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<25} {:>29.1}%\n",
            "Profit Margin:", self.profit_margin
        ));
        output.push_str(&format!(
            "{:<25} {:>30}\n",
            "Transactions:", self.transaction_count
        ));
        output
    }
}
