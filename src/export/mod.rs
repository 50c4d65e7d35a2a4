//! Export module for ledger-report
//!
//! - JSON: the full dashboard data contract
//! - CSV: the consolidated ledger (spreadsheet-compatible)

pub mod csv;
pub mod json;

pub use self::csv::{export_ledger_csv, LEDGER_HEADERS};
pub use json::{
    export_dashboard_json, import_dashboard_json, DashboardData, EXPORT_SCHEMA_VERSION,
};
