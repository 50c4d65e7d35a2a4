//! CLI commands for reports
//!
//! Every report runs over an already consolidated ledger.

use clap::Subcommand;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use super::filter::FilterArgs;
use crate::config::Settings;
use crate::display::{format_ledger_table, format_outcomes, format_share_chart, format_waterfall};
use crate::error::{LedgerError, LedgerResult};
use crate::models::TransactionType;
use crate::reports::{
    CategoryBreakdown, CrossCheck, Granularity, Kpis, LedgerFilter, LedgerSummary,
    OfficialSummary, PeriodTrend,
};
use crate::services::Consolidation;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Summarize the consolidated ledger and show per-source results
    Summary,

    /// Income, expenses, net profit and margin for a subset of the ledger
    Kpis {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List ledger transactions
    #[command(alias = "transactions")]
    Ledger {
        #[command(flatten)]
        filter: FilterArgs,

        /// Number of transactions to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Official P&L statement and waterfall
    Official,

    /// Income and expenses per month or quarter
    Trends {
        #[command(flatten)]
        filter: FilterArgs,

        /// Group by quarter instead of month
        #[arg(short, long)]
        quarterly: bool,
    },

    /// Count and sum per category and type
    Breakdown {
        #[command(flatten)]
        filter: FilterArgs,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare ledger totals with the official figures
    Check,
}

/// Handle report commands
pub fn handle_report_command(
    consolidation: &Consolidation,
    settings: &Settings,
    cmd: ReportCommands,
) -> LedgerResult<()> {
    match cmd {
        ReportCommands::Summary => handle_summary(consolidation, settings),
        ReportCommands::Kpis { filter } => handle_kpis(consolidation, settings, filter.into()),
        ReportCommands::Ledger { filter, limit } => {
            handle_ledger(consolidation, settings, filter.into(), limit)
        }
        ReportCommands::Official => handle_official(settings),
        ReportCommands::Trends { filter, quarterly } => {
            let granularity = if quarterly {
                Granularity::Quarterly
            } else {
                Granularity::Monthly
            };
            handle_trends(consolidation, settings, filter.into(), granularity)
        }
        ReportCommands::Breakdown { filter, output } => {
            handle_breakdown(consolidation, settings, filter.into(), output)
        }
        ReportCommands::Check => handle_check(consolidation, settings),
    }
}

fn handle_summary(consolidation: &Consolidation, settings: &Settings) -> LedgerResult<()> {
    let summary = LedgerSummary::generate(&consolidation.ledger);
    println!("{}", summary.format_terminal(&settings.currency_symbol));
    println!("{}", format_outcomes(&consolidation.outcomes));

    if !consolidation.is_complete() {
        println!(
            "Warning: {} source(s) failed; the report covers the remaining data.",
            consolidation.failures().len()
        );
    }

    Ok(())
}

fn handle_kpis(
    consolidation: &Consolidation,
    settings: &Settings,
    filter: LedgerFilter,
) -> LedgerResult<()> {
    let entries = consolidation.ledger.filter(&filter);
    let kpis = Kpis::calculate(entries);
    let title = format!("Key Performance Indicators ({})", filter.describe());
    println!("{}", kpis.format_terminal(&title, &settings.currency_symbol));
    Ok(())
}

fn handle_ledger(
    consolidation: &Consolidation,
    settings: &Settings,
    filter: LedgerFilter,
    limit: Option<usize>,
) -> LedgerResult<()> {
    let entries = consolidation.ledger.filter(&filter);
    print!(
        "{}",
        format_ledger_table(&entries, &settings.currency_symbol, limit)
    );
    Ok(())
}

fn handle_official(settings: &Settings) -> LedgerResult<()> {
    let summary = OfficialSummary::from_figures(&settings.official_figures);
    println!("{}", summary.format_terminal(&settings.currency_symbol));
    println!(
        "{}",
        format_waterfall(&summary.waterfall(), &settings.currency_symbol)
    );
    Ok(())
}

fn handle_trends(
    consolidation: &Consolidation,
    settings: &Settings,
    filter: LedgerFilter,
    granularity: Granularity,
) -> LedgerResult<()> {
    let trend = PeriodTrend::generate(granularity, consolidation.ledger.filter(&filter));
    println!("{}", trend.format_terminal(&settings.currency_symbol));
    if let Some(best) = trend.best_period() {
        println!(
            "Best period: {} (net {})",
            best.period,
            best.net().format_with_symbol(&settings.currency_symbol)
        );
    }
    Ok(())
}

fn handle_breakdown(
    consolidation: &Consolidation,
    settings: &Settings,
    filter: LedgerFilter,
    output: Option<PathBuf>,
) -> LedgerResult<()> {
    let breakdown = CategoryBreakdown::generate(consolidation.ledger.filter(&filter));

    if let Some(path) = output {
        let file = File::create(&path).map_err(|e| {
            LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        breakdown.export_csv(BufWriter::new(file))?;
        println!("Category breakdown exported to: {}", path.display());
    } else {
        println!("{}", breakdown.format_terminal(&settings.currency_symbol));
        println!("{}", format_share_chart(&breakdown, TransactionType::Expense));
    }

    Ok(())
}

fn handle_check(consolidation: &Consolidation, settings: &Settings) -> LedgerResult<()> {
    let official = OfficialSummary::from_figures(&settings.official_figures);
    let check = CrossCheck::run(&consolidation.ledger, &official);
    println!("{}", check.format_terminal(&settings.currency_symbol));

    if check.passed() {
        Ok(())
    } else {
        Err(LedgerError::Validation(format!(
            "ledger totals for {} disagree with the official figures",
            check.year
        )))
    }
}
