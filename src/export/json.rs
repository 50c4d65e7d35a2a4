//! JSON Export functionality
//!
//! Bundles everything the dashboard renders into one versioned document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::reports::{
    CategoryBreakdown, CrossCheck, ExpenseLine, KeyMetrics, LedgerFilter, LedgerSummary,
    OfficialSummary, PeriodTrend, WaterfallStep, YearOverYear,
};
use crate::services::{Consolidation, Ledger, SourceOutcome};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// The dashboard data contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub generated_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub key_metrics: KeyMetrics,
    pub summary: LedgerSummary,
    /// Official year to book year, when the ledger holds both
    pub year_over_year: Option<YearOverYear>,
    pub official: OfficialSummary,
    pub waterfall: Vec<WaterfallStep>,
    pub expense_breakdown: Vec<ExpenseLine>,
    /// Book year only
    pub monthly_trend: PeriodTrend,
    /// Book year only
    pub quarterly_trend: PeriodTrend,
    pub category_breakdown: CategoryBreakdown,
    pub cross_check: CrossCheck,

    /// Load result of every source
    pub sources: Vec<SourceOutcome>,

    pub ledger: Ledger,
}

impl DashboardData {
    /// Build the dashboard from a consolidation run
    pub fn build(consolidation: &Consolidation, settings: &Settings) -> Self {
        let ledger = &consolidation.ledger;
        let official = OfficialSummary::from_figures(&settings.official_figures);
        let summary = LedgerSummary::generate(ledger);
        let book_year = LedgerFilter::year(settings.book_year);

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            key_metrics: KeyMetrics::from(&official),
            year_over_year: summary.year_over_year(official.year, settings.book_year),
            summary,
            waterfall: official.waterfall(),
            expense_breakdown: official.expense_breakdown(),
            monthly_trend: PeriodTrend::monthly(ledger.filter(&book_year)),
            quarterly_trend: PeriodTrend::quarterly(ledger.filter(&book_year)),
            category_breakdown: CategoryBreakdown::generate(ledger),
            cross_check: CrossCheck::run(ledger, &official),
            official,
            sources: consolidation.outcomes.clone(),
            ledger: ledger.clone(),
        }
    }

    /// Check the document is internally consistent
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        if self.summary.total_transactions != self.ledger.len() {
            return Err(format!(
                "Summary counts {} transactions but the ledger holds {}",
                self.summary.total_transactions,
                self.ledger.len()
            ));
        }

        let loaded: usize = self.sources.iter().map(SourceOutcome::records).sum();
        if loaded != self.ledger.len() {
            return Err(format!(
                "Sources report {} records but the ledger holds {}",
                loaded,
                self.ledger.len()
            ));
        }

        Ok(())
    }
}

/// Write the dashboard document as JSON
pub fn export_dashboard_json<W: Write>(
    dashboard: &DashboardData,
    writer: &mut W,
    pretty: bool,
) -> LedgerResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, dashboard)
    } else {
        serde_json::to_writer(writer, dashboard)
    }
    .map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}

/// Read back a dashboard document
pub fn import_dashboard_json(json_str: &str) -> LedgerResult<DashboardData> {
    let dashboard: DashboardData = serde_json::from_str(json_str)?;
    dashboard.validate().map_err(LedgerError::Validation)?;
    Ok(dashboard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, OfficialFigures, Transaction, TransactionType};
    use crate::services::{Consolidator, LoadPolicy, OfficialSource, TransactionSource};
    use chrono::NaiveDate;

    struct Sheet;

    impl TransactionSource for Sheet {
        fn name(&self) -> &str {
            "Utilities"
        }

        fn load(&self) -> LedgerResult<Vec<Transaction>> {
            Ok(vec![Transaction::new(
                NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
                Money::from_cents(250_050),
                2025,
                Category::Utilities,
                TransactionType::Expense,
                "KPLC token",
            )])
        }
    }

    fn dashboard() -> DashboardData {
        let consolidation = Consolidator::new(LoadPolicy::AnySource)
            .with_source(OfficialSource::new(OfficialFigures::FY2024))
            .with_source(Sheet)
            .consolidate()
            .unwrap();
        DashboardData::build(&consolidation, &Settings::default())
    }

    #[test]
    fn test_build() {
        let dashboard = dashboard();

        assert_eq!(dashboard.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(dashboard.ledger.len(), 7);
        assert_eq!(dashboard.summary.years, vec![2024, 2025]);
        assert_eq!(dashboard.key_metrics.net_profit, Money::from_cents(338_907_535));
        assert_eq!(dashboard.waterfall.len(), 7);
        assert!(dashboard.cross_check.passed());
        assert!(dashboard.validate().is_ok());
    }

    #[test]
    fn test_trends_cover_book_year_only() {
        let dashboard = dashboard();

        let months: Vec<_> = dashboard
            .monthly_trend
            .periods
            .iter()
            .map(|p| p.period.as_str())
            .collect();
        assert_eq!(months, vec!["2025-03"]);
        assert_eq!(dashboard.monthly_trend.periods[0].expenses, Money::from_cents(250_050));

        let quarters: Vec<_> = dashboard
            .quarterly_trend
            .periods
            .iter()
            .map(|p| p.period.as_str())
            .collect();
        assert_eq!(quarters, vec!["2025Q1"]);
    }

    #[test]
    fn test_official_only_ledger_has_empty_trends() {
        let consolidation = Consolidator::new(LoadPolicy::AnySource)
            .with_source(OfficialSource::new(OfficialFigures::FY2024))
            .consolidate()
            .unwrap();
        let dashboard = DashboardData::build(&consolidation, &Settings::default());

        assert!(dashboard.monthly_trend.periods.is_empty());
        assert!(dashboard.quarterly_trend.periods.is_empty());
        assert!(dashboard.year_over_year.is_none());
        assert_eq!(dashboard.summary.years, vec![2024]);
    }

    #[test]
    fn test_year_over_year_from_official_year() {
        let change = dashboard().year_over_year.unwrap();
        assert_eq!((change.from, change.to), (2024, 2025));
        assert_eq!(change.income_change, Some(-100.0));
    }

    #[test]
    fn test_json_contract() {
        let mut buffer = Vec::new();
        export_dashboard_json(&dashboard(), &mut buffer, false).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["key_metrics"]["net_profit"], 338_907_535);
        assert_eq!(value["ledger"][6]["category"], "Utilities");
        assert_eq!(value["ledger"][6]["type"], "Expense");
        assert_eq!(value["ledger"][6]["month"], "2025-03");
        assert_eq!(value["ledger"][6]["quarter"], "2025Q1");
        assert_eq!(value["sources"][1]["status"], "loaded");
        assert_eq!(value["waterfall"][6]["measure"], "total");
    }

    #[test]
    fn test_import_roundtrip_validates() {
        let mut buffer = Vec::new();
        export_dashboard_json(&dashboard(), &mut buffer, true).unwrap();

        let imported = import_dashboard_json(std::str::from_utf8(&buffer).unwrap()).unwrap();
        assert_eq!(imported.ledger, dashboard().ledger);
    }

    #[test]
    fn test_validate_rejects_other_schema() {
        let mut dashboard = dashboard();
        dashboard.schema_version = "0.1.0".into();
        assert!(dashboard.validate().is_err());
    }
}
