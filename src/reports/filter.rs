//! Ledger filtering
//!
//! Every dimension has an explicit "match everything" value, so an omitted
//! criterion and the `both` sentinel behave the same.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::{Category, TransactionType};
use crate::services::LedgerEntry;

/// Sentinel accepted on the command line for "no filter on this dimension"
pub const BOTH: &str = "both";

/// Year criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum YearFilter {
    #[default]
    All,
    Year(i32),
}

impl YearFilter {
    pub fn matches(&self, year: i32) -> bool {
        match self {
            Self::All => true,
            Self::Year(y) => *y == year,
        }
    }
}

impl From<Option<i32>> for YearFilter {
    fn from(year: Option<i32>) -> Self {
        year.map_or(Self::All, Self::Year)
    }
}

impl FromStr for YearFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(BOTH) || s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<i32>()
            .map(Self::Year)
            .map_err(|_| format!("Invalid year '{}'. Use a year such as 2025 or 'both'", s))
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all years"),
            Self::Year(y) => write!(f, "{}", y),
        }
    }
}

/// Transaction type criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TypeFilter {
    #[default]
    Both,
    Only(TransactionType),
}

impl TypeFilter {
    pub fn matches(&self, kind: TransactionType) -> bool {
        match self {
            Self::Both => true,
            Self::Only(k) => *k == kind,
        }
    }
}

impl From<Option<TransactionType>> for TypeFilter {
    fn from(kind: Option<TransactionType>) -> Self {
        kind.map_or(Self::Both, Self::Only)
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(BOTH) {
            return Ok(Self::Both);
        }
        s.parse::<TransactionType>().map(Self::Only)
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Both => write!(f, "income and expenses"),
            Self::Only(k) => write!(f, "{}", k),
        }
    }
}

/// Criteria for selecting a subset of the ledger
///
/// An empty category list matches every category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerFilter {
    pub year: YearFilter,
    pub categories: Vec<Category>,
    pub kind: TypeFilter,
}

impl LedgerFilter {
    /// Filter on a single year
    pub fn year(year: i32) -> Self {
        Self {
            year: YearFilter::Year(year),
            ..Self::default()
        }
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_kind(mut self, kind: TypeFilter) -> Self {
        self.kind = kind;
        self
    }

    /// True when no criterion is set
    pub fn is_unrestricted(&self) -> bool {
        self.year == YearFilter::All && self.categories.is_empty() && self.kind == TypeFilter::Both
    }

    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        let txn = &entry.transaction;
        self.year.matches(txn.year)
            && (self.categories.is_empty() || self.categories.contains(&txn.category))
            && self.kind.matches(txn.kind)
    }

    /// Short human description, e.g. "2025, Sales/Rent, Expense"
    pub fn describe(&self) -> String {
        let categories = if self.categories.is_empty() {
            "all categories".to_string()
        } else {
            self.categories
                .iter()
                .map(Category::label)
                .collect::<Vec<_>>()
                .join("/")
        };
        format!("{}, {}, {}", self.year, categories, self.kind)
    }
}
