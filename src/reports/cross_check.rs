//! Cross-check of ledger totals against the official statement

use serde::{Deserialize, Serialize};

use super::filter::LedgerFilter;
use super::kpi::Kpis;
use super::official::OfficialSummary;
use crate::models::Money;
use crate::services::Ledger;

/// One compared figure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckLine {
    pub label: String,
    pub ledger: Money,
    pub official: Money,
}

impl CheckLine {
    fn new(label: &str, ledger: Money, official: Money) -> Self {
        Self {
            label: label.to_string(),
            ledger,
            official,
        }
    }

    /// Ledger minus official
    pub fn difference(&self) -> Money {
        self.ledger - self.official
    }

    pub fn matches(&self) -> bool {
        self.difference().is_zero()
    }
}

/// Ledger-derived KPIs for the official year compared with the statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossCheck {
    pub year: i32,
    pub lines: Vec<CheckLine>,
}

impl CrossCheck {
    pub fn run(ledger: &Ledger, official: &OfficialSummary) -> Self {
        let kpis = Kpis::calculate(ledger.filter(&LedgerFilter::year(official.year)));

        let lines = vec![
            CheckLine::new("Sales", kpis.total_income, official.sales),
            CheckLine::new("Total Expenses", kpis.total_expenses, official.total_expenses()),
            CheckLine::new("Net Profit", kpis.net_profit, official.net_profit),
        ];

        let check = Self {
            year: official.year,
            lines,
        };
        if check.passed() {
            tracing::info!(year = check.year, "ledger agrees with official figures");
        } else {
            for line in check.lines.iter().filter(|l| !l.matches()) {
                tracing::warn!(
                    year = check.year,
                    line = %line.label,
                    difference = %line.difference(),
                    "ledger disagrees with official figures"
                );
            }
        }
        check
    }

    pub fn passed(&self) -> bool {
        self.lines.iter().all(CheckLine::matches)
    }

    /// Format the check for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Cross-check {} (ledger vs official)\n", self.year));
        output.push_str(&"=".repeat(92));
        output.push('\n');
        output.push_str(&format!(
            "{:<16} {:>24} {:>24} {:>24}\n",
            "Line", "Ledger", "Official", "Difference"
        ));
        output.push_str(&"-".repeat(92));
        output.push('\n');

        for line in &self.lines {
            let status = if line.matches() { "OK" } else { "MISMATCH" };
            output.push_str(&format!(
                "{:<16} {:>24} {:>24} {:>24}  {}\n",
                line.label,
                line.ledger.format_with_symbol(currency),
                line.official.format_with_symbol(currency),
                line.difference().format_with_symbol(currency),
                status
            ));
        }

        output.push('\n');
        if self.passed() {
            output.push_str("Result: PASS\n");
        } else {
            output.push_str("Result: FAIL\n");
        }
        output
    }
}
