//! Command-line front end: argument parsing, command dispatch and text output.

pub mod commands;
pub mod output;
pub mod render;
pub mod suggest;
pub mod table;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{builder::BoolishValueParser, ArgAction, Args, Parser, Subcommand};
use finboard_domain::{Bucketing, FlowFilter};

pub use commands::run;

#[derive(Parser, Debug)]
#[command(
    name = "finboard",
    version,
    about = "Budget-vs-actual reports from exported transaction data"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare spending and income against budgets for a date range
    Report(ReportArgs),

    /// List transactions one page at a time, newest first
    #[command(alias = "txn")]
    Transactions(TransactionArgs),

    /// Show or change stored preferences
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Dataset file (JSON with `transactions` and `budgets`); defaults to the last one used
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// First day of the range (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub from: NaiveDate,

    /// Last day of the range (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub to: NaiveDate,

    /// Category to report on, or `All`
    #[arg(short, long, default_value = "All")]
    pub category: String,

    /// expense, income or both
    #[arg(long, default_value = "both")]
    pub flow: FlowFilter,

    /// Trend bucketing (day, week, month); defaults to the configured one
    #[arg(short, long)]
    pub bucket: Option<Bucketing>,

    /// Show empty trend buckets as zero
    #[arg(long)]
    pub fill_gaps: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct TransactionArgs {
    /// Dataset file; defaults to the last one used
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Page to show; out-of-range pages are clamped
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    pub page: i64,

    /// Items per page; defaults to the configured page size
    #[arg(long, allow_negative_numbers = true)]
    pub page_size: Option<i64>,

    #[arg(long)]
    pub from: Option<NaiveDate>,

    #[arg(long)]
    pub to: Option<NaiveDate>,

    #[arg(short, long)]
    pub category: Option<String>,

    #[arg(long)]
    pub flow: Option<FlowFilter>,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the current preferences and where they are stored
    Show,

    /// Default number of transactions per page
    SetPageSize { size: i64 },

    /// Default trend bucketing
    SetBucket { bucket: Bucketing },

    /// Enable or disable coloured output (on/off)
    SetColor {
        #[arg(action = ArgAction::Set, value_parser = BoolishValueParser::new())]
        enabled: bool,
    },

    /// Slack allowed when sub-category amounts are checked against their parent
    SetTolerance { tolerance: f64 },

    /// Currency code and display precision
    SetCurrency {
        code: String,
        #[arg(long)]
        precision: Option<u8>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_report_arguments() {
        let cli = Cli::try_parse_from([
            "finboard", "report", "--data", "data.json", "--from", "2024-01-01", "--to",
            "2024-01-31", "--flow", "expense", "--bucket", "week",
        ])
        .unwrap();
        match cli.command {
            Commands::Report(args) => {
                assert_eq!(args.flow, FlowFilter::Expense);
                assert_eq!(args.bucket, Some(Bucketing::Week));
                assert_eq!(args.category, "All");
                assert!(!args.json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(Cli::try_parse_from(["finboard", "report", "--from", "Jan", "--to", "2024-01-31"])
            .is_err());
    }

    #[test]
    fn set_color_accepts_on_off() {
        let cli = Cli::try_parse_from(["finboard", "config", "set-color", "off"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::SetColor { enabled: false })
        ));
    }
}
