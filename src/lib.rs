//! ledger-report - consolidated profit and loss reporting
//!
//! Merges a business's official year-end P&L figures with the per-category
//! sheets of its bookkeeping workbook into one normalized ledger, and derives
//! KPIs, trends, breakdowns and a dashboard data document from it.
//!
//! # Architecture
//!
//! - `config`: Settings and path management
//! - `error`: Custom error types
//! - `models`: Money, transactions, periods and the official figures
//! - `services`: Sources, sheet import and consolidation into a ledger
//! - `reports`: Pure calculations over the ledger
//! - `display`: Terminal tables and text charts
//! - `export`: JSON dashboard and CSV ledger export
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use ledger_report::config::{ReportPaths, Settings};
//! use ledger_report::services::Consolidator;
//!
//! let paths = ReportPaths::new()?;
//! let settings = Settings::load_or_default(&paths)?;
//! let consolidation = Consolidator::standard(&paths, &settings).consolidate()?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{LedgerError, LedgerResult};
