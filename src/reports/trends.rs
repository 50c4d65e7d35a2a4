//! Period trends
//!
//! Income and expense totals per month or quarter, in chronological order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::models::{Money, TransactionType};
use crate::services::LedgerEntry;

/// Granularity of a trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    #[default]
    Monthly,
    Quarterly,
}

/// Totals for one period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// "2025-01" or "2025Q1"
    pub period: String,
    pub income: Money,
    pub expenses: Money,
    pub transactions: usize,
}

impl PeriodTotals {
    pub fn net(&self) -> Money {
        self.income - self.expenses
    }
}

/// Income and expenses over time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTrend {
    pub granularity: Granularity,
    pub periods: Vec<PeriodTotals>,
}

impl PeriodTrend {
    pub fn monthly<'a>(entries: impl IntoIterator<Item = &'a LedgerEntry>) -> Self {
        Self::build(Granularity::Monthly, entries, |e| e.month)
    }

    pub fn quarterly<'a>(entries: impl IntoIterator<Item = &'a LedgerEntry>) -> Self {
        Self::build(Granularity::Quarterly, entries, |e| e.quarter)
    }

    pub fn generate<'a>(
        granularity: Granularity,
        entries: impl IntoIterator<Item = &'a LedgerEntry>,
    ) -> Self {
        match granularity {
            Granularity::Monthly => Self::monthly(entries),
            Granularity::Quarterly => Self::quarterly(entries),
        }
    }

    fn build<'a, K: Ord + fmt::Display>(
        granularity: Granularity,
        entries: impl IntoIterator<Item = &'a LedgerEntry>,
        key: impl Fn(&LedgerEntry) -> K,
    ) -> Self {
        let mut buckets: BTreeMap<K, PeriodTotals> = BTreeMap::new();

        for entry in entries {
            let period = key(entry);
            let label = period.to_string();
            let totals = buckets.entry(period).or_insert_with(|| PeriodTotals {
                period: label,
                income: Money::zero(),
                expenses: Money::zero(),
                transactions: 0,
            });

            totals.transactions += 1;
            match entry.transaction.kind {
                TransactionType::Income => totals.income += entry.transaction.amount,
                TransactionType::Expense => totals.expenses += entry.transaction.amount,
            }
        }

        Self {
            granularity,
            periods: buckets.into_values().collect(),
        }
    }

    /// Period with the highest net result
    pub fn best_period(&self) -> Option<&PeriodTotals> {
        self.periods.iter().max_by_key(|p| p.net())
    }

    /// Format the trend for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();
        let title = match self.granularity {
            Granularity::Monthly => "Monthly Trends",
            Granularity::Quarterly => "Quarterly Trends",
        };

        output.push_str(&format!("{}\n", title));
        output.push_str(&"=".repeat(84));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>24} {:>24} {:>24}\n",
            "Period", "Income", "Expenses", "Net"
        ));
        output.push_str(&"-".repeat(84));
        output.push('\n');

        if self.periods.is_empty() {
            output.push_str("No transactions in range.\n");
            return output;
        }

        for period in &self.periods {
            output.push_str(&format!(
                "{:<10} {:>24} {:>24} {:>24}\n",
                period.period,
                period.income.format_with_symbol(currency),
                period.expenses.format_with_symbol(currency),
                period.net().format_with_symbol(currency)
            ));
        }

        output
    }
}
