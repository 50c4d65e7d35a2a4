//! Core data models for ledger-report
//!
//! This module contains the data structures that represent the reporting
//! domain: money, transactions, categories, reporting periods and the
//! official P&L figures.

pub mod money;
pub mod official;
pub mod period;
pub mod transaction;

pub use money::{Money, MoneyParseError};
pub use official::OfficialFigures;
pub use period::{Month, Quarter};
pub use transaction::{Category, Transaction, TransactionType};
