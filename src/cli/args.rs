use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::calendar::parse_date;

#[derive(Debug, Parser)]
#[command(
    name = "cashflow_cli",
    about = "Card obligations and day-by-day cash-flow projections for a ledger snapshot",
    disable_version_flag = true
)]
pub struct Cli {
    /// Print build metadata and exit.
    #[arg(long = "version", short = 'V')]
    pub version: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Projection from today, or over an explicit --from/--to window.
    Project(ProjectArgs),
    /// Projection over the salary period containing today.
    Period(CommonArgs),
    /// Headline totals plus the upcoming week.
    Summary(SummaryArgs),
    /// Limits, statement and due dates per card.
    Cards(CommonArgs),
}

#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Ledger snapshot JSON file.
    pub snapshot: PathBuf,
    /// Reference date (YYYY-MM-DD); defaults to the current UTC date.
    #[arg(long, value_parser = date_arg)]
    pub today: Option<NaiveDate>,
    /// Emit JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ProjectArgs {
    #[command(flatten)]
    pub common: CommonArgs,
    #[arg(long, value_parser = date_arg, requires = "to")]
    pub from: Option<NaiveDate>,
    #[arg(long, value_parser = date_arg, requires = "from")]
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub common: CommonArgs,
    /// JSON map of feed code to home-currency quote, e.g. {"xau": 85000}.
    #[arg(long)]
    pub prices: Option<PathBuf>,
}

fn date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_custom_window() {
        let cli = Cli::try_parse_from([
            "cashflow_cli",
            "project",
            "ledger.json",
            "--from",
            "2025-03-01",
            "--to",
            "2025-03-31",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Project(args)) => {
                assert_eq!(args.from, NaiveDate::from_ymd_opt(2025, 3, 1));
                assert_eq!(args.to, NaiveDate::from_ymd_opt(2025, 3, 31));
                assert_eq!(args.common.snapshot, PathBuf::from("ledger.json"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn half_open_window_is_rejected() {
        let result =
            Cli::try_parse_from(["cashflow_cli", "project", "ledger.json", "--from", "2025-03-01"]);
        assert!(result.is_err());
    }

    #[test]
    fn malformed_date_is_rejected() {
        let result =
            Cli::try_parse_from(["cashflow_cli", "cards", "ledger.json", "--today", "03/01/2025"]);
        assert!(result.is_err());
    }
}
