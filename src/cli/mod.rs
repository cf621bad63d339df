//! Command-line front end over the wallet document.

pub mod dashboard;
pub mod handlers;
pub mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use wallet_domain::DateRange;

use crate::errors::CliError;

/// Personal wallet dashboard and budget manager.
#[derive(Debug, Parser)]
#[command(name = "wallet_cli", version, about, long_about = None)]
pub struct Cli {
    /// Wallet document to use instead of the configured one.
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Disable colors and status icons.
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Optional inclusive date bounds. Bare dates mean midnight UTC.
#[derive(Debug, Clone, Default, Args)]
pub struct RangeArgs {
    /// Earliest transaction date to include.
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,
    /// Latest transaction date to include.
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,
}

impl RangeArgs {
    pub fn to_range(&self) -> Result<DateRange, CliError> {
        DateRange::parse(self.from.as_deref(), self.to.as_deref())
            .map_err(|err| CliError::InvalidArgument(err.to_string()))
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Balance card and headline statistics.
    Summary(RangeArgs),
    /// Expense breakdown by category.
    Categories(RangeArgs),
    /// Monthly income and expense totals.
    Series(RangeArgs),
    /// Recorded transactions, newest first.
    Transactions {
        #[command(flatten)]
        range: RangeArgs,
        /// Show at most this many rows.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Every budget with its current progress.
    Budgets,
    /// Budgets at or past their warning threshold.
    Alerts,
    /// Record an income or expense.
    AddTransaction {
        /// `income` or `expense`.
        #[arg(long = "type", value_name = "TYPE")]
        kind: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        amount: f64,
        /// Transaction date, e.g. 2024-01-31.
        #[arg(long)]
        date: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Create a monthly budget.
    AddBudget {
        /// Month in YYYY-MM form.
        #[arg(long)]
        month: String,
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,
        /// Turn alerts on for this budget.
        #[arg(long)]
        alerts: bool,
        #[arg(long)]
        category: Option<String>,
    },
    /// Change the amount, alert flag or category of a budget.
    UpdateBudget {
        id: u64,
        #[arg(long, allow_negative_numbers = true)]
        amount: Option<f64>,
        #[arg(long)]
        alerts: Option<bool>,
        /// Pass an empty string to clear the category.
        #[arg(long)]
        category: Option<String>,
    },
    DeleteBudget {
        id: u64,
    },
    /// Write transactions as CSV to a file or stdout.
    Export {
        #[command(flatten)]
        range: RangeArgs,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Show build metadata.
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_work_after_the_subcommand() {
        let cli = Cli::try_parse_from(["wallet_cli", "summary", "--from", "2024-01-01", "--plain", "--data", "db.json"])
            .unwrap();
        assert!(cli.plain);
        assert_eq!(cli.data, Some(PathBuf::from("db.json")));
        match cli.command {
            Command::Summary(range) => assert_eq!(range.from.as_deref(), Some("2024-01-01")),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn bad_range_is_an_argument_error() {
        let range = RangeArgs {
            from: Some("tomorrow-ish".into()),
            to: None,
        };
        assert!(matches!(range.to_range(), Err(CliError::InvalidArgument(_))));
    }
}
