//! Transaction model
//!
//! The single record shape every source is normalized into. Amounts are
//! stored as magnitudes; whether money came in or went out is carried by
//! [`TransactionType`].

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" | "expenses" => Ok(Self::Expense),
            other => Err(format!(
                "Unknown transaction type '{}'. Use income or expense",
                other
            )),
        }
    }
}

/// The fixed set of ledger categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Sales")]
    Sales,
    #[serde(rename = "Stock Purchase")]
    StockPurchase,
    #[serde(rename = "Labour")]
    Labour,
    #[serde(rename = "Rent")]
    Rent,
    #[serde(rename = "Transport")]
    Transport,
    #[serde(rename = "Transaction Costs")]
    TransactionCosts,
    #[serde(rename = "Utilities")]
    Utilities,
    #[serde(rename = "Savings")]
    Savings,
    #[serde(rename = "Savings Withdrawal")]
    SavingsWithdrawal,
    #[serde(rename = "Other Expenses")]
    OtherExpenses,
}

impl Category {
    /// Every category, in declaration order
    pub const ALL: [Category; 10] = [
        Category::Sales,
        Category::StockPurchase,
        Category::Labour,
        Category::Rent,
        Category::Transport,
        Category::TransactionCosts,
        Category::Utilities,
        Category::Savings,
        Category::SavingsWithdrawal,
        Category::OtherExpenses,
    ];

    /// Human-readable label, also used for sorting and serialization
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sales => "Sales",
            Self::StockPurchase => "Stock Purchase",
            Self::Labour => "Labour",
            Self::Rent => "Rent",
            Self::Transport => "Transport",
            Self::TransactionCosts => "Transaction Costs",
            Self::Utilities => "Utilities",
            Self::Savings => "Savings",
            Self::SavingsWithdrawal => "Savings Withdrawal",
            Self::OtherExpenses => "Other Expenses",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| {
                c.label().eq_ignore_ascii_case(wanted)
                    || c.label().replace(' ', "-").eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("Unknown category '{}'", wanted))
    }
}

/// A normalized financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction date
    pub date: NaiveDate,

    /// Amount as a non-negative magnitude
    pub amount: Money,

    /// Fiscal year the record is reported under
    pub year: i32,

    pub category: Category,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Free-text description
    #[serde(default)]
    pub details: String,
}

impl Transaction {
    /// Create a new transaction, storing the magnitude of `amount`
    pub fn new(
        date: NaiveDate,
        amount: Money,
        year: i32,
        category: Category,
        kind: TransactionType,
        details: impl Into<String>,
    ) -> Self {
        Self {
            date,
            amount: amount.abs(),
            year,
            category,
            kind,
            details: details.into(),
        }
    }

    /// Create a transaction whose year is taken from its date
    pub fn dated(
        date: NaiveDate,
        amount: Money,
        category: Category,
        kind: TransactionType,
        details: impl Into<String>,
    ) -> Self {
        Self::new(date, amount, date.year(), category, kind, details)
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Amount with the sign implied by the type (expenses negative)
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.kind,
            self.amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_stores_magnitude() {
        let txn = Transaction::new(
            date(2025, 3, 4),
            Money::from_cents(-12_500),
            2025,
            Category::Rent,
            TransactionType::Expense,
            "March rent",
        );
        assert_eq!(txn.amount.cents(), 12_500);
        assert_eq!(txn.signed_amount().cents(), -12_500);
        assert!(txn.is_expense());
    }

    #[test]
    fn test_dated_uses_calendar_year() {
        let txn = Transaction::dated(
            date(2024, 12, 31),
            Money::from_units(10),
            Category::Sales,
            TransactionType::Income,
            "",
        );
        assert_eq!(txn.year, 2024);
        assert!(txn.is_income());
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("sales".parse::<Category>(), Ok(Category::Sales));
        assert_eq!(
            "Savings Withdrawal".parse::<Category>(),
            Ok(Category::SavingsWithdrawal)
        );
        assert_eq!(
            "stock-purchase".parse::<Category>(),
            Ok(Category::StockPurchase)
        );
        assert!("Groceries".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_labels_sort_like_strings() {
        let mut by_label: Vec<_> = Category::ALL.iter().map(|c| c.label()).collect();
        by_label.sort();
        assert_eq!(by_label.first(), Some(&"Labour"));
        assert_eq!(by_label.last(), Some(&"Utilities"));
    }

    #[test]
    fn test_type_parse() {
        assert_eq!("Income".parse::<TransactionType>(), Ok(TransactionType::Income));
        assert_eq!(" expense ".parse::<TransactionType>(), Ok(TransactionType::Expense));
        assert!("both".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_serialization_uses_labels() {
        let txn = Transaction::new(
            date(2024, 12, 31),
            Money::from_cents(16_355_765),
            2024,
            Category::TransactionCosts,
            TransactionType::Expense,
            "charges",
        );
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["category"], "Transaction Costs");
        assert_eq!(json["type"], "Expense");
        assert_eq!(json["amount"], 16_355_765);
        assert_eq!(json["date"], "2024-12-31");
    }
}
