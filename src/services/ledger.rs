//! The consolidated ledger
//!
//! Built once from every source's records and never mutated afterwards.
//! Each entry carries the month and quarter derived from its date so later
//! grouping does not have to recompute them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Month, Quarter, Transaction};
use crate::reports::LedgerFilter;

/// A transaction plus its derived reporting periods
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub month: Month,
    pub quarter: Quarter,
}

impl LedgerEntry {
    pub fn new(transaction: Transaction) -> Self {
        let month = Month::of(transaction.date);
        Self {
            month,
            quarter: month.quarter(),
            transaction,
        }
    }
}

impl From<Transaction> for LedgerEntry {
    fn from(transaction: Transaction) -> Self {
        Self::new(transaction)
    }
}

/// Inclusive date span of a set of entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Span of the given entries, or `None` if there are none
    pub fn of<'a>(entries: impl IntoIterator<Item = &'a LedgerEntry>) -> Option<Self> {
        entries.into_iter().fold(None, |range, entry| {
            let date = entry.transaction.date;
            Some(match range {
                None => DateRange {
                    start: date,
                    end: date,
                },
                Some(r) => DateRange {
                    start: r.start.min(date),
                    end: r.end.max(date),
                },
            })
        })
    }
}

/// Ordered, immutable sequence of ledger entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    /// Merge transactions into a ledger, deriving periods for every row
    pub fn from_transactions(transactions: impl IntoIterator<Item = Transaction>) -> Self {
        Self {
            entries: transactions.into_iter().map(LedgerEntry::new).collect(),
        }
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LedgerEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn date_range(&self) -> Option<DateRange> {
        DateRange::of(&self.entries)
    }

    /// Entries matching every criterion of `filter`
    pub fn filter(&self, filter: &LedgerFilter) -> Vec<&LedgerEntry> {
        self.entries.iter().filter(|e| filter.matches(e)).collect()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a LedgerEntry;
    type IntoIter = std::slice::Iter<'a, LedgerEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
