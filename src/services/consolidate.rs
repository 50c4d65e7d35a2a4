//! Ledger consolidation
//!
//! Loads every configured source independently and merges whatever they
//! produce into one [`Ledger`]. A source that fails is logged and contributes
//! nothing; the run as a whole only fails when the load policy says so.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ledger::Ledger;
use super::source::{standard_sources, TransactionSource};
use crate::config::{ReportPaths, Settings};
use crate::error::{LedgerError, LedgerResult, SourceFailure};
use crate::reports::CategoryBreakdown;

/// How many sources must load for consolidation to succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// Partial success is fine as long as some source produced rows
    #[default]
    AnySource,
    /// Every source must load without error
    AllSources,
}

/// What happened when a source was loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceStatus {
    Loaded { records: usize },
    Failed { reason: String },
}

/// Per-source result, kept so a run can say which sources failed and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceOutcome {
    pub source: String,
    #[serde(flatten)]
    pub status: SourceStatus,
}

impl SourceOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self.status, SourceStatus::Loaded { .. })
    }

    pub fn records(&self) -> usize {
        match self.status {
            SourceStatus::Loaded { records } => records,
            SourceStatus::Failed { .. } => 0,
        }
    }
}

impl fmt::Display for SourceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            SourceStatus::Loaded { records } => {
                write!(f, "{}: {} transactions", self.source, records)
            }
            SourceStatus::Failed { reason } => write!(f, "{}: FAILED ({})", self.source, reason),
        }
    }
}

/// A consolidated ledger plus the outcome of every source
#[derive(Debug, Clone)]
pub struct Consolidation {
    pub ledger: Ledger,
    pub outcomes: Vec<SourceOutcome>,
}

impl Consolidation {
    /// Sources that failed, with reasons
    pub fn failures(&self) -> Vec<SourceFailure> {
        collect_failures(&self.outcomes)
    }

    /// True when every source loaded
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(SourceOutcome::is_loaded)
    }
}

fn collect_failures(outcomes: &[SourceOutcome]) -> Vec<SourceFailure> {
    outcomes
        .iter()
        .filter_map(|o| match &o.status {
            SourceStatus::Failed { reason } => Some(SourceFailure {
                source: o.source.clone(),
                reason: reason.clone(),
            }),
            SourceStatus::Loaded { .. } => None,
        })
        .collect()
}

/// Builds a ledger from a set of independent sources
pub struct Consolidator {
    sources: Vec<Box<dyn TransactionSource>>,
    policy: LoadPolicy,
}

impl Consolidator {
    /// Create a consolidator with no sources
    pub fn new(policy: LoadPolicy) -> Self {
        Self {
            sources: Vec::new(),
            policy,
        }
    }

    /// The official figures plus every sheet of the standard workbook
    pub fn standard(paths: &ReportPaths, settings: &Settings) -> Self {
        Self {
            sources: standard_sources(paths, settings),
            policy: settings.load_policy,
        }
    }

    /// Add a source
    pub fn with_source(mut self, source: impl TransactionSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Load every source and merge the results
    ///
    /// Every source is attempted even after earlier ones fail.
    pub fn consolidate(&self) -> LedgerResult<Consolidation> {
        tracing::info!(sources = self.sources.len(), "loading financial data");

        let mut transactions = Vec::new();
        let mut outcomes = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            match source.load() {
                Ok(records) => {
                    tracing::info!(source = source.name(), records = records.len(), "source loaded");
                    outcomes.push(SourceOutcome {
                        source: source.name().to_string(),
                        status: SourceStatus::Loaded {
                            records: records.len(),
                        },
                    });
                    transactions.extend(records);
                }
                Err(e) => {
                    tracing::error!(source = source.name(), error = %e, "source failed to load");
                    outcomes.push(SourceOutcome {
                        source: source.name().to_string(),
                        status: SourceStatus::Failed {
                            reason: e.to_string(),
                        },
                    });
                }
            }
        }

        let failures = collect_failures(&outcomes);

        if transactions.is_empty() {
            tracing::warn!("no data could be loaded");
            return Err(LedgerError::NoData { failures });
        }

        if self.policy == LoadPolicy::AllSources && !failures.is_empty() {
            return Err(LedgerError::PolicyViolation { failures });
        }

        let ledger = Ledger::from_transactions(transactions);
        log_ledger(&ledger);

        Ok(Consolidation { ledger, outcomes })
    }
}

fn log_ledger(ledger: &Ledger) {
    let summary = crate::reports::LedgerSummary::generate(ledger);
    tracing::info!(transactions = ledger.len(), "consolidated ledger");
    if let Some(range) = summary.date_range {
        tracing::info!(start = %range.start, end = %range.end, "date range");
    }
    tracing::info!(
        categories = %summary.category_labels().join(", "),
        years = ?summary.years,
        "ledger contents"
    );

    for row in CategoryBreakdown::generate(ledger).rows {
        tracing::debug!(
            category = %row.category,
            kind = %row.kind,
            count = row.count,
            total = %row.total,
            "category breakdown"
        );
    }
}
