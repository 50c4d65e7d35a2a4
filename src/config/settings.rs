//! Report settings
//!
//! Loaded from an optional JSON file; every field has a default so a missing
//! file or a partial one both work.

use serde::{Deserialize, Serialize};

use super::paths::ReportPaths;
use crate::error::LedgerError;
use crate::models::OfficialFigures;
use crate::services::LoadPolicy;

/// Settings for a report run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency prefix used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Fiscal year the workbook's sheets belong to
    #[serde(default = "default_book_year")]
    pub book_year: i32,

    /// Date format tried first when reading sheet dates (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// How many sources must load for the run to count as a success
    #[serde(default)]
    pub load_policy: LoadPolicy,

    /// Authoritative P&L figures
    #[serde(default)]
    pub official_figures: OfficialFigures,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "KES ".to_string()
}

fn default_book_year() -> i32 {
    2025
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            book_year: default_book_year(),
            date_format: default_date_format(),
            load_policy: LoadPolicy::default(),
            official_figures: OfficialFigures::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_default(paths: &ReportPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            LedgerError::Config(format!(
                "Failed to parse settings file {}: {}",
                settings_path.display(),
                e
            ))
        })?;

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ReportPaths) -> Result<(), LedgerError> {
        let settings_path = paths.settings_file();
        if let Some(parent) = settings_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| LedgerError::Io(format!("Failed to create config directory: {}", e)))?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
