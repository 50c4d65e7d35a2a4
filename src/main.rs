use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ledger_report::cli::{handle_export_command, handle_report_command, ExportArgs, ReportCommands};
use ledger_report::config::{ReportPaths, Settings};
use ledger_report::services::{Consolidation, Consolidator};

#[derive(Parser)]
#[command(
    name = "ledger-report",
    version,
    about = "Consolidated profit and loss reports from a small business workbook",
    long_about = "ledger-report merges the official year-end P&L figures with the \
                  per-category sheets of a bookkeeping workbook (exported as CSV) \
                  into one ledger, then reports KPIs, trends and breakdowns from it."
)]
struct Cli {
    /// Directory holding one CSV export per workbook sheet
    #[arg(long, global = true, env = "LEDGER_REPORT_WORKBOOK")]
    workbook: Option<PathBuf>,

    /// Settings file (JSON)
    #[arg(long, global = true, env = "LEDGER_REPORT_CONFIG")]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Report(ReportCommands),

    /// Write the dashboard data (JSON) or the ledger (CSV) to a file
    Export(ExportArgs),

    /// Show current configuration and paths
    Config {
        /// Write the current settings to the settings file
        #[arg(long)]
        init: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "ledger_report=info",
        1 => "ledger_report=debug",
        _ => "ledger_report=trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = ReportPaths::new()?
        .with_workbook_dir(cli.workbook)
        .with_settings_file(cli.config);
    let settings = Settings::load_or_default(&paths)?;

    match cli.command {
        Some(Commands::Report(cmd)) => {
            let consolidation = consolidate(&paths, &settings)?;
            handle_report_command(&consolidation, &settings, cmd)?;
        }
        Some(Commands::Export(args)) => {
            let consolidation = consolidate(&paths, &settings)?;
            handle_export_command(&consolidation, &paths, &settings, args)?;
        }
        Some(Commands::Config { init }) => {
            if init {
                settings.save(&paths)?;
                println!("Settings written to: {}", paths.settings_file().display());
                println!();
            }
            print_config(&paths, &settings);
        }
        None => {
            println!("ledger-report - consolidated P&L reporting");
            println!();
            println!("Run 'ledger-report --help' for usage information.");
            println!("Run 'ledger-report summary' for an overview of the ledger.");
        }
    }

    Ok(())
}

fn consolidate(paths: &ReportPaths, settings: &Settings) -> Result<Consolidation> {
    let consolidation = Consolidator::standard(paths, settings).consolidate()?;
    for failure in consolidation.failures() {
        tracing::warn!(source = %failure.source, reason = %failure.reason, "source skipped");
    }
    Ok(consolidation)
}

fn print_config(paths: &ReportPaths, settings: &Settings) {
    println!("ledger-report Configuration");
    println!("===========================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Workbook:         {}", paths.workbook_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!("Output directory: {}", paths.output_dir().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol: {:?}", settings.currency_symbol);
    println!("  Book year:       {}", settings.book_year);
    println!("  Date format:     {}", settings.date_format);
    println!("  Load policy:     {:?}", settings.load_policy);
    println!("  Official year:   {}", settings.official_figures.year);
    println!();
    println!("Sources:");
    for name in Consolidator::standard(paths, settings).source_names() {
        println!("  - {}", name);
    }
}
