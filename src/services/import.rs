//! Sheet import
//!
//! Reads one workbook sheet export (CSV) and turns its rows into ledger
//! transactions according to the sheet's [`SourceSchema`]. Rows with a
//! missing or unparseable date or amount are dropped, not reported as errors.

use chrono::{NaiveDate, NaiveDateTime};
use csv::{Reader, ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::schema::{AmountRule, ColumnRef, SourceSchema};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Transaction, TransactionType};

/// Date formats tried after the configured one. Slash dates are read
/// month-first when both readings are valid.
const DATE_FORMATS: [&str; 11] = [
    "%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%m/%d/%y", "%d/%m/%y", "%Y/%m/%d", "%d-%m-%Y",
    "%d-%b-%Y", "%d-%b-%y", "%d %b %Y", "%d.%m.%Y",
];

/// Date-time formats produced by spreadsheet exports; only the date is kept
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Options shared by every sheet of a workbook
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Fiscal year assigned to every imported record
    pub book_year: i32,
    /// Date format tried first
    pub date_format: String,
}

impl ImportOptions {
    pub fn new(book_year: i32) -> Self {
        Self {
            book_year,
            date_format: "%Y-%m-%d".to_string(),
        }
    }

    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }
}

/// Result of importing one sheet
#[derive(Debug, Clone, Default)]
pub struct SheetImport {
    pub transactions: Vec<Transaction>,
    /// Data rows read (after skipped sub-header rows)
    pub rows_read: usize,
    /// Rows that produced no record
    pub rows_dropped: usize,
}

/// Column indices of a schema resolved against a sheet's header row
#[derive(Debug, Clone, Copy)]
struct ResolvedColumns {
    date: usize,
    first: usize,
    second: Option<usize>,
    details: Option<usize>,
}

/// Imports sheets according to their schema
pub struct SheetImporter<'a> {
    schema: &'a SourceSchema,
    options: &'a ImportOptions,
}

impl<'a> SheetImporter<'a> {
    pub fn new(schema: &'a SourceSchema, options: &'a ImportOptions) -> Self {
        Self { schema, options }
    }

    /// Open and import a sheet export from disk
    ///
    /// The file handle lives only for the duration of this call.
    pub fn import_file(&self, path: &Path) -> LedgerResult<SheetImport> {
        let file = File::open(path).map_err(|e| {
            LedgerError::source_load(
                &self.schema.name,
                format!(
                    "cannot open sheet '{}' at {}: {}",
                    self.schema.sheet,
                    path.display(),
                    e
                ),
            )
        })?;

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(BufReader::new(file));

        self.import_from_reader(&mut reader)
    }

    /// Import rows from an already-configured CSV reader
    pub fn import_from_reader<R: Read>(&self, reader: &mut Reader<R>) -> LedgerResult<SheetImport> {
        let headers = reader
            .headers()
            .map_err(|e| {
                LedgerError::source_load(&self.schema.name, format!("unreadable header: {}", e))
            })?
            .clone();
        let columns = self.resolve_columns(&headers)?;

        let mut result = SheetImport::default();
        for record in reader.records().skip(self.schema.skip_rows) {
            result.rows_read += 1;
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    tracing::debug!(source = %self.schema.name, error = %e, "unreadable row dropped");
                    result.rows_dropped += 1;
                    continue;
                }
            };

            match self.parse_record(&record, columns) {
                Some(txn) => result.transactions.push(txn),
                None => result.rows_dropped += 1,
            }
        }

        Ok(result)
    }

    fn resolve_columns(&self, headers: &StringRecord) -> LedgerResult<ResolvedColumns> {
        let resolve = |column: &ColumnRef| {
            column
                .resolve(headers)
                .ok_or_else(|| LedgerError::missing_column(&self.schema.name, column.to_string()))
        };

        let (first, second) = match &self.schema.amount {
            AmountRule::Single { column, .. } => (resolve(column)?, None),
            AmountRule::Combined {
                withdrawals,
                deposits,
                ..
            } => (resolve(withdrawals)?, Some(resolve(deposits)?)),
            AmountRule::Split {
                deposits,
                withdrawals,
                ..
            } => (resolve(deposits)?, Some(resolve(withdrawals)?)),
        };

        Ok(ResolvedColumns {
            date: resolve(&self.schema.date_column)?,
            first,
            second,
            details: self.schema.details_column.as_ref().map(resolve).transpose()?,
        })
    }

    /// Turn one row into at most one transaction
    fn parse_record(&self, record: &StringRecord, columns: ResolvedColumns) -> Option<Transaction> {
        let date = parse_date(cell(record, columns.date)?, &self.options.date_format)?;
        let details = columns
            .details
            .and_then(|idx| cell(record, idx))
            .unwrap_or_default();

        let (amount, category, kind) = match &self.schema.amount {
            AmountRule::Single { category, kind, .. } => {
                let amount = parse_amount(cell(record, columns.first)?)?;
                (amount.abs(), *category, *kind)
            }
            AmountRule::Combined { category, kind, .. } => {
                let withdrawals = optional_amount(record, Some(columns.first));
                let deposits = optional_amount(record, columns.second);
                let total = withdrawals + deposits;
                if !total.is_positive() {
                    return None;
                }
                (total, *category, *kind)
            }
            AmountRule::Split {
                income, expense, ..
            } => {
                let deposit = optional_amount(record, Some(columns.first));
                let withdrawal = optional_amount(record, columns.second);
                let (amount, kind) = split_amount(deposit, withdrawal)?;
                let category = match kind {
                    TransactionType::Income => *income,
                    TransactionType::Expense => *expense,
                };
                (amount, category, kind)
            }
        };

        Some(Transaction::new(
            date,
            amount,
            self.options.book_year,
            category,
            kind,
            details,
        ))
    }
}

/// Decide the single record a deposit/withdrawal row produces
///
/// Only positive values count. When a row carries both, it is netted and the
/// larger side wins.
pub fn split_amount(deposit: Money, withdrawal: Money) -> Option<(Money, TransactionType)> {
    let deposit = if deposit.is_positive() { deposit } else { Money::zero() };
    let withdrawal = if withdrawal.is_positive() {
        withdrawal
    } else {
        Money::zero()
    };

    let net = deposit - withdrawal;
    if net.is_positive() {
        Some((net, TransactionType::Income))
    } else if net.is_negative() {
        Some((net.abs(), TransactionType::Expense))
    } else {
        None
    }
}

fn cell(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

fn optional_amount(record: &StringRecord, idx: Option<usize>) -> Money {
    idx.and_then(|i| cell(record, i))
        .and_then(parse_amount)
        .unwrap_or_default()
}

/// Parse a date cell, trying the primary format, then common bank formats,
/// then spreadsheet date-time exports
pub fn parse_date(s: &str, primary_format: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, primary_format) {
        return Some(date);
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
                .map(|dt| dt.date())
        })
}

/// Parse an amount cell; blanks and non-numeric text yield `None`
pub fn parse_amount(s: &str) -> Option<Money> {
    Money::parse(s).ok()
}
