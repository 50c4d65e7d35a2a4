//! Data consolidation layer
//!
//! Sources, the per-sheet schema table, the sheet importer and the
//! consolidator that merges everything into one ledger.

pub mod consolidate;
pub mod import;
pub mod ledger;
pub mod schema;
pub mod source;

pub use consolidate::{Consolidation, Consolidator, LoadPolicy, SourceOutcome, SourceStatus};
pub use import::{ImportOptions, SheetImport, SheetImporter};
pub use ledger::{DateRange, Ledger, LedgerEntry};
pub use schema::{AmountRule, ColumnRef, SourceSchema};
pub use source::{standard_sources, OfficialSource, SheetSource, TransactionSource};
