//! CLI command for data export

use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use super::filter::FilterArgs;
use crate::config::{ReportPaths, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_dashboard_json, export_ledger_csv, DashboardData};
use crate::reports::LedgerFilter;
use crate::services::Consolidation;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    /// Full dashboard document
    #[default]
    Json,
    /// Ledger transactions only
    Csv,
}

impl ExportFormat {
    fn default_file_name(&self) -> &'static str {
        match self {
            Self::Json => "dashboard.json",
            Self::Csv => "ledger.csv",
        }
    }
}

/// Export arguments
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Output file path (default: <base>/output/dashboard.json or ledger.csv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Filters applied to the CSV ledger export
    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Handle the export command
pub fn handle_export_command(
    consolidation: &Consolidation,
    paths: &ReportPaths,
    settings: &Settings,
    args: ExportArgs,
) -> LedgerResult<()> {
    let output = match args.output {
        Some(path) => path,
        None => {
            paths.ensure_output_dir()?;
            paths.output_dir().join(args.format.default_file_name())
        }
    };

    let file = File::create(&output).map_err(|e| {
        LedgerError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    match args.format {
        ExportFormat::Json => {
            let dashboard = DashboardData::build(consolidation, settings);
            export_dashboard_json(&dashboard, &mut writer, args.pretty)?;
            tracing::info!(path = %output.display(), "dashboard exported");
            println!("Dashboard data exported to: {}", output.display());
        }
        ExportFormat::Csv => {
            let filter = LedgerFilter::from(args.filter);
            let count = export_ledger_csv(consolidation.ledger.filter(&filter), &mut writer)?;
            tracing::info!(path = %output.display(), count, "ledger exported");
            println!("Exported {} transactions to: {}", count, output.display());
        }
    }

    writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))
}
