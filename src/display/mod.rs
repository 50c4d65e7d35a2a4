//! Display formatting for terminal output
//!
//! Tables and chart-like text renderings used by the CLI.

pub mod ledger;
pub mod report;

pub use ledger::format_ledger_table;
pub use report::{format_outcomes, format_share_chart, format_waterfall};
