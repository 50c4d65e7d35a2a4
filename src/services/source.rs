//! Transaction sources
//!
//! A source is one independent origin of ledger records. Each one is loaded
//! on its own, so a failure in one never affects the others.

use std::path::PathBuf;

use super::import::{ImportOptions, SheetImporter};
use super::schema::SourceSchema;
use crate::config::{ReportPaths, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{OfficialFigures, Transaction};

/// Something that can produce ledger records
pub trait TransactionSource {
    /// Name used in logs and outcome reports
    fn name(&self) -> &str;

    /// Load every record this source contributes
    fn load(&self) -> LedgerResult<Vec<Transaction>>;
}

/// The official year-end figures, one record per P&L line
#[derive(Debug, Clone)]
pub struct OfficialSource {
    name: String,
    figures: OfficialFigures,
}

impl OfficialSource {
    pub fn new(figures: OfficialFigures) -> Self {
        Self {
            name: format!("Official P&L {}", figures.year),
            figures,
        }
    }
}

impl TransactionSource for OfficialSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> LedgerResult<Vec<Transaction>> {
        self.figures.to_transactions().ok_or_else(|| {
            LedgerError::source_load(
                &self.name,
                format!("year {} has no valid year-end date", self.figures.year),
            )
        })
    }
}

/// One workbook sheet, read through its schema
#[derive(Debug, Clone)]
pub struct SheetSource {
    schema: SourceSchema,
    path: PathBuf,
    options: ImportOptions,
}

impl SheetSource {
    pub fn new(schema: SourceSchema, path: PathBuf, options: ImportOptions) -> Self {
        Self {
            schema,
            path,
            options,
        }
    }
}

impl TransactionSource for SheetSource {
    fn name(&self) -> &str {
        &self.schema.name
    }

    fn load(&self) -> LedgerResult<Vec<Transaction>> {
        let import = SheetImporter::new(&self.schema, &self.options).import_file(&self.path)?;

        if import.rows_dropped > 0 {
            tracing::debug!(
                source = %self.schema.name,
                dropped = import.rows_dropped,
                read = import.rows_read,
                "rows without a usable date or amount were skipped"
            );
        }

        Ok(import.transactions)
    }
}

/// The official figures followed by every sheet of the standard workbook
pub fn standard_sources(paths: &ReportPaths, settings: &Settings) -> Vec<Box<dyn TransactionSource>> {
    let options = ImportOptions::new(settings.book_year).with_date_format(&settings.date_format);

    let mut sources: Vec<Box<dyn TransactionSource>> =
        vec![Box::new(OfficialSource::new(settings.official_figures.clone()))];

    for schema in SourceSchema::standard() {
        let path = paths.sheet_file(&schema.sheet);
        sources.push(Box::new(SheetSource::new(schema, path, options.clone())));
    }

    sources
}
