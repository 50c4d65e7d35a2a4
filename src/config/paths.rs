//! Path management for ledger-report
//!
//! ## Path Resolution Order
//!
//! 1. Explicit overrides (`--workbook`, `--config` on the command line)
//! 2. `LEDGER_REPORT_DIR` environment variable as the base directory
//! 3. The current working directory

use std::path::PathBuf;

use crate::error::LedgerError;

/// Manages all paths used by ledger-report
#[derive(Debug, Clone)]
pub struct ReportPaths {
    /// Base directory everything else defaults under
    base_dir: PathBuf,
    workbook_override: Option<PathBuf>,
    settings_override: Option<PathBuf>,
}

impl ReportPaths {
    /// Create a new ReportPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn new() -> Result<Self, LedgerError> {
        let base_dir = match std::env::var("LEDGER_REPORT_DIR") {
            Ok(custom) => PathBuf::from(custom),
            Err(_) => std::env::current_dir().map_err(|e| {
                LedgerError::Config(format!("Could not determine current directory: {}", e))
            })?,
        };

        Ok(Self::with_base_dir(base_dir))
    }

    /// Create ReportPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            workbook_override: None,
            settings_override: None,
        }
    }

    /// Use an explicit workbook directory
    pub fn with_workbook_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.workbook_override = dir;
        self
    }

    /// Use an explicit settings file
    pub fn with_settings_file(mut self, file: Option<PathBuf>) -> Self {
        self.settings_override = file;
        self
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one CSV export per workbook sheet
    pub fn workbook_dir(&self) -> PathBuf {
        self.workbook_override
            .clone()
            .unwrap_or_else(|| self.base_dir.join("workbook"))
    }

    /// Path of the CSV export for a named sheet
    pub fn sheet_file(&self, sheet: &str) -> PathBuf {
        self.workbook_dir().join(format!("{}.csv", sheet))
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.settings_override
            .clone()
            .unwrap_or_else(|| self.base_dir.join("ledger-report.json"))
    }

    /// Default directory for exported reports
    pub fn output_dir(&self) -> PathBuf {
        self.base_dir.join("output")
    }

    /// Ensure the output directory exists
    pub fn ensure_output_dir(&self) -> Result<(), LedgerError> {
        std::fs::create_dir_all(self.output_dir())
            .map_err(|e| LedgerError::Io(format!("Failed to create output directory: {}", e)))
    }
}
