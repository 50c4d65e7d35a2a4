//! Reports module for ledger-report
//!
//! Pure calculations over the consolidated ledger (summary, filters, KPIs,
//! trends, category breakdown) plus the official P&L statement and the
//! cross-check between the two.

pub mod breakdown;
pub mod cross_check;
pub mod filter;
pub mod kpi;
pub mod official;
pub mod summary;
pub mod trends;

pub use breakdown::{BreakdownRow, CategoryBreakdown};
pub use cross_check::{CheckLine, CrossCheck};
pub use filter::{LedgerFilter, TypeFilter, YearFilter, BOTH};
pub use kpi::Kpis;
pub use official::{ExpenseLine, KeyMetrics, Measure, OfficialSummary, WaterfallStep};
pub use summary::{LedgerSummary, YearBreakdown, YearOverYear};
pub use trends::{Granularity, PeriodTotals, PeriodTrend};
