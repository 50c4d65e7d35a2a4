//! Per-source schema mapping
//!
//! Every workbook sheet has its own column layout. Rather than renaming
//! columns ad hoc while loading, each sheet is described by a [`SourceSchema`]
//! that says where the date, amount and details live and how the amount's
//! sign convention maps onto a category and transaction type.

use csv::StringRecord;
use std::fmt;

use crate::models::{Category, TransactionType};

/// Reference to a sheet column, by header name or by position
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRef {
    /// Header text, matched case-insensitively after trimming
    Named(String),
    /// Zero-based column index, for sheets whose headers are unusable
    Position(usize),
}

impl ColumnRef {
    pub fn named(header: impl Into<String>) -> Self {
        Self::Named(header.into())
    }

    pub fn position(index: usize) -> Self {
        Self::Position(index)
    }

    /// Resolve this reference to a column index in `headers`
    pub fn resolve(&self, headers: &StringRecord) -> Option<usize> {
        match self {
            Self::Named(name) => headers
                .iter()
                .position(|h| normalize_header(h).eq_ignore_ascii_case(name.trim())),
            Self::Position(index) => (*index < headers.len()).then_some(*index),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "'{}'", name),
            Self::Position(index) => write!(f, "#{}", index),
        }
    }
}

fn normalize_header(header: &str) -> &str {
    header.trim_start_matches('\u{feff}').trim()
}

/// How a row's amount columns map onto ledger records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountRule {
    /// One amount column; every row with a parseable amount is one record
    Single {
        column: ColumnRef,
        category: Category,
        kind: TransactionType,
    },
    /// Withdrawals and deposits are added together (blanks count as zero);
    /// rows that sum to zero are dropped
    Combined {
        withdrawals: ColumnRef,
        deposits: ColumnRef,
        category: Category,
        kind: TransactionType,
    },
    /// Deposits become income and withdrawals become expenses, each in its
    /// own category. A row yields at most one record.
    Split {
        deposits: ColumnRef,
        withdrawals: ColumnRef,
        income: Category,
        expense: Category,
    },
}

impl AmountRule {
    /// Columns this rule reads
    pub fn columns(&self) -> Vec<&ColumnRef> {
        match self {
            Self::Single { column, .. } => vec![column],
            Self::Combined {
                withdrawals,
                deposits,
                ..
            }
            | Self::Split {
                deposits,
                withdrawals,
                ..
            } => vec![withdrawals, deposits],
        }
    }

    /// (category, type) pairs this rule can produce
    pub fn outputs(&self) -> Vec<(Category, TransactionType)> {
        match self {
            Self::Single { category, kind, .. } | Self::Combined { category, kind, .. } => {
                vec![(*category, *kind)]
            }
            Self::Split {
                income, expense, ..
            } => vec![
                (*income, TransactionType::Income),
                (*expense, TransactionType::Expense),
            ],
        }
    }
}

/// Declarative description of one workbook sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSchema {
    /// Source name used in logs and outcome reports
    pub name: String,
    /// Sheet name; the export is read from `<sheet>.csv`
    pub sheet: String,
    pub date_column: ColumnRef,
    pub amount: AmountRule,
    pub details_column: Option<ColumnRef>,
    /// Data rows to skip after the header (sub-headers, notes)
    pub skip_rows: usize,
}

impl SourceSchema {
    /// Every column the sheet must have for this schema to apply
    pub fn required_columns(&self) -> Vec<&ColumnRef> {
        let mut columns = vec![&self.date_column];
        columns.extend(self.amount.columns());
        columns.extend(self.details_column.as_ref());
        columns
    }

    /// The schema table for the book of accounts workbook
    pub fn standard() -> Vec<SourceSchema> {
        let narrative = || Some(ColumnRef::named("Transaction Narrative"));
        let tran_date = || ColumnRef::named("Tran Date");

        vec![
            // Header row is unreliable; columns are Date, Value Date,
            // Withdrawals, Amount, Details
            SourceSchema {
                name: "Sales".into(),
                sheet: "Sales".into(),
                date_column: ColumnRef::position(0),
                amount: AmountRule::Single {
                    column: ColumnRef::position(3),
                    category: Category::Sales,
                    kind: TransactionType::Income,
                },
                details_column: Some(ColumnRef::position(4)),
                skip_rows: 0,
            },
            SourceSchema {
                name: "Labour".into(),
                sheet: "Labour".into(),
                date_column: tran_date(),
                amount: AmountRule::Single {
                    column: ColumnRef::named("Withdrawals"),
                    category: Category::Labour,
                    kind: TransactionType::Expense,
                },
                details_column: narrative(),
                skip_rows: 0,
            },
            // First data row is a second header line
            SourceSchema {
                name: "Rent".into(),
                sheet: "rent".into(),
                date_column: ColumnRef::position(1),
                amount: AmountRule::Single {
                    column: ColumnRef::position(2),
                    category: Category::Rent,
                    kind: TransactionType::Expense,
                },
                details_column: Some(ColumnRef::position(4)),
                skip_rows: 1,
            },
            SourceSchema {
                name: "Stock Purchase".into(),
                sheet: "Purchase of stock".into(),
                date_column: tran_date(),
                amount: AmountRule::Single {
                    column: ColumnRef::named("Deposits"),
                    category: Category::StockPurchase,
                    kind: TransactionType::Expense,
                },
                details_column: narrative(),
                skip_rows: 0,
            },
            SourceSchema {
                name: "Utilities".into(),
                sheet: "Utilities".into(),
                date_column: tran_date(),
                amount: AmountRule::Combined {
                    withdrawals: ColumnRef::named("Withdrawals"),
                    deposits: ColumnRef::named("Deposits"),
                    category: Category::Utilities,
                    kind: TransactionType::Expense,
                },
                details_column: narrative(),
                skip_rows: 0,
            },
            SourceSchema {
                name: "Savings".into(),
                sheet: "Saving".into(),
                date_column: tran_date(),
                amount: AmountRule::Split {
                    deposits: ColumnRef::named("Deposits"),
                    withdrawals: ColumnRef::named("Withdrawals"),
                    income: Category::Savings,
                    expense: Category::SavingsWithdrawal,
                },
                details_column: narrative(),
                skip_rows: 0,
            },
            SourceSchema {
                name: "Other Expenses".into(),
                sheet: "Expense".into(),
                date_column: tran_date(),
                amount: AmountRule::Single {
                    column: ColumnRef::named("Withdrawals"),
                    category: Category::OtherExpenses,
                    kind: TransactionType::Expense,
                },
                details_column: narrative(),
                skip_rows: 0,
            },
        ]
    }
}
