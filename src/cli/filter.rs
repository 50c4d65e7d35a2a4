//! Shared ledger filter arguments

use clap::Args;

use crate::models::Category;
use crate::reports::{LedgerFilter, TypeFilter, YearFilter};

/// Filter flags accepted by every ledger-based report
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Year to include, or "both" for every year
    #[arg(short, long, default_value = "both")]
    pub year: YearFilter,

    /// Category to include; repeat for several (default: all)
    #[arg(short, long = "category")]
    pub categories: Vec<Category>,

    /// income, expense or both
    #[arg(short = 't', long = "type", default_value = "both")]
    pub kind: TypeFilter,
}

impl From<FilterArgs> for LedgerFilter {
    fn from(args: FilterArgs) -> Self {
        LedgerFilter {
            year: args.year,
            categories: args.categories,
            kind: args.kind,
        }
    }
}
