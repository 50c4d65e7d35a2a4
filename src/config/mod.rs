//! Configuration module for ledger-report
//!
//! This module provides configuration management including:
//! - Workbook and settings path resolution
//! - Report settings (currency, book year, load policy, official figures)

pub mod paths;
pub mod settings;

pub use paths::ReportPaths;
pub use settings::Settings;
