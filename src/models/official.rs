//! Official year-end P&L figures
//!
//! These are the authoritative statement lines. They seed one ledger record
//! per line and double as an independent cross-check of ledger totals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;
use super::transaction::{Category, Transaction, TransactionType};

/// Authoritative P&L figures for a single year
///
/// Amounts are in cents when read from a settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficialFigures {
    /// Fiscal year the figures cover
    pub year: i32,
    pub sales: Money,
    /// Cost of goods sold (stock purchases)
    pub cogs: Money,
    pub labour: Money,
    pub rent: Money,
    pub transport: Money,
    pub transaction_costs: Money,
}

impl OfficialFigures {
    /// The audited 2024 P&L account
    pub const FY2024: OfficialFigures = OfficialFigures {
        year: 2024,
        sales: Money::from_units(22_619_122),
        cogs: Money::from_units(17_244_564),
        labour: Money::from_units(601_155),
        rent: Money::from_units(192_000),
        transport: Money::from_units(1_028_770),
        transaction_costs: Money::from_cents(16_355_765),
    };

    /// Year-end date every official record is booked on
    pub fn year_end(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, 12, 31)
    }

    /// Operating expense lines (everything below gross profit)
    pub fn operating_expenses(&self) -> [(Category, Money); 4] {
        [
            (Category::Labour, self.labour),
            (Category::Rent, self.rent),
            (Category::Transport, self.transport),
            (Category::TransactionCosts, self.transaction_costs),
        ]
    }

    /// One ledger record per statement line, dated at year-end
    pub fn to_transactions(&self) -> Option<Vec<Transaction>> {
        let date = self.year_end()?;
        let line = |amount, category, kind, details: &str| {
            Transaction::new(date, amount, self.year, category, kind, details)
        };

        Some(vec![
            line(
                self.sales,
                Category::Sales,
                TransactionType::Income,
                "Total Sales Revenue (Official P&L)",
            ),
            line(
                self.cogs,
                Category::StockPurchase,
                TransactionType::Expense,
                "Cost of Goods Sold - Purchases (Official P&L)",
            ),
            line(
                self.labour,
                Category::Labour,
                TransactionType::Expense,
                "Labour Costs (Official P&L)",
            ),
            line(
                self.rent,
                Category::Rent,
                TransactionType::Expense,
                "Rent Expenses (Official P&L)",
            ),
            line(
                self.transport,
                Category::Transport,
                TransactionType::Expense,
                "Transport Expenses (Official P&L)",
            ),
            line(
                self.transaction_costs,
                Category::TransactionCosts,
                TransactionType::Expense,
                "Transaction Costs & Charges (Official P&L)",
            ),
        ])
    }
}

impl Default for OfficialFigures {
    fn default() -> Self {
        Self::FY2024
    }
}
