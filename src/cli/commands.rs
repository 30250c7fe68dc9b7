use std::{fs, io::Write, path::Path};

use chrono::NaiveDate;
use serde::Serialize;

use super::args::{Cli, Command, CommonArgs, ProjectArgs, SummaryArgs};
use super::output::{amount, change, day_events, label_value, section};
use super::table::{Table, TableColumn};
use super::CliError;
use crate::config::{Config, ConfigManager};
use crate::ledger::LedgerSnapshot;
use crate::pricing::{PriceBook, StaticPrices};
use crate::projection::{Projection, ProjectionDay};
use crate::services::{CashFlowService, DashboardSummary, SummaryService};
use crate::time::{Clock, SystemClock};
use crate::utils::{build_info, persistence::load_snapshot_from_file};

pub fn execute<W: Write>(cli: Cli, out: &mut W) -> Result<(), CliError> {
    if cli.version {
        return print_version(out);
    }
    let Some(command) = cli.command else {
        return Err(CliError::Usage(
            "expected a command: project, period, summary or cards".into(),
        ));
    };
    let config = ConfigManager::new()?.load()?;
    match command {
        Command::Project(args) => cmd_project(&args, &config, out),
        Command::Period(args) => cmd_period(&args, &config, out),
        Command::Summary(args) => cmd_summary(&args, &config, out),
        Command::Cards(args) => cmd_cards(&args, &config, out),
    }
}

struct Loaded {
    snapshot: LedgerSnapshot,
    today: NaiveDate,
}

fn load(args: &CommonArgs) -> Result<Loaded, CliError> {
    let snapshot = load_snapshot_from_file(&args.snapshot)?;
    let today = args.today.unwrap_or_else(|| SystemClock.today());
    Ok(Loaded { snapshot, today })
}

fn cmd_project<W: Write>(args: &ProjectArgs, config: &Config, out: &mut W) -> Result<(), CliError> {
    let Loaded { snapshot, today } = load(&args.common)?;
    let projection = match (args.from, args.to) {
        (Some(from), Some(to)) => {
            let window = CashFlowService::window(from, to)?;
            CashFlowService::custom(&snapshot, today, window, config)?
        }
        (None, None) => CashFlowService::dashboard(&snapshot, today, config)?,
        _ => return Err(CliError::Usage("--from and --to must be given together".into())),
    };
    emit_projection(&projection, args.common.json, out)
}

fn cmd_period<W: Write>(args: &CommonArgs, config: &Config, out: &mut W) -> Result<(), CliError> {
    let Loaded { snapshot, today } = load(args)?;
    let projection = CashFlowService::salary_period(&snapshot, today, config)?;
    emit_projection(&projection, args.json, out)
}

fn cmd_summary<W: Write>(args: &SummaryArgs, config: &Config, out: &mut W) -> Result<(), CliError> {
    let Loaded { snapshot, today } = load(&args.common)?;
    let prices = match &args.prices {
        Some(path) => {
            let source = read_prices(path)?;
            let instruments = snapshot
                .investment_accounts
                .iter()
                .map(|account| account.instrument);
            PriceBook::fetch(&source, instruments)
        }
        None => PriceBook::default(),
    };
    let projection = CashFlowService::dashboard(&snapshot, today, config)?;
    let summary = SummaryService::dashboard(&snapshot, &prices, &projection, config);
    if args.common.json {
        return write_json(&summary, out);
    }
    render_summary(&summary, &config.currency, out)
}

fn cmd_cards<W: Write>(args: &CommonArgs, config: &Config, out: &mut W) -> Result<(), CliError> {
    let Loaded { snapshot, today } = load(args)?;
    let overviews = CashFlowService::card_overviews(&snapshot, today, config)?;
    if args.json {
        return write_json(&overviews, out);
    }
    writeln!(out, "{}", section("Cards"))?;
    if overviews.is_empty() {
        writeln!(out, "No cards.")?;
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::left("Card").max_width(24),
        TableColumn::right("Limit"),
        TableColumn::right("Used"),
        TableColumn::right("Available"),
        TableColumn::right("Period debt"),
        TableColumn::left("Statement"),
        TableColumn::left("Due"),
    ]);
    for card in &overviews {
        table.push_row(vec![
            card.name.clone(),
            amount(card.total_limit),
            amount(card.used_limit),
            amount(card.available_limit),
            amount(card.period_debt),
            card.statement_date.to_string(),
            card.due_date.to_string(),
        ]);
    }
    writeln!(out, "{}", table.render())?;
    Ok(())
}

fn emit_projection<W: Write>(projection: &Projection, json: bool, out: &mut W) -> Result<(), CliError> {
    if json {
        return write_json(projection, out);
    }
    writeln!(
        out,
        "{}",
        section(&format!(
            "Cash flow {} .. {}",
            projection.window.start, projection.window.end
        ))
    )?;
    writeln!(out, "{}", label_value("Starting balance", amount(projection.starting_balance)))?;
    if projection.is_empty() {
        writeln!(out, "No days in window.")?;
        return Ok(());
    }
    writeln!(out, "{}", projection_table(&projection.days).render())?;
    writeln!(out, "{}", label_value("Closing balance", amount(projection.closing_balance())))?;
    if let Some(lowest) = projection.lowest_day() {
        writeln!(
            out,
            "{}",
            label_value("Lowest balance", format!("{} on {}", amount(lowest.balance), lowest.date_str))
        )?;
    }
    Ok(())
}

fn projection_table(days: &[ProjectionDay]) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("Date"),
        TableColumn::left("Events").max_width(48),
        TableColumn::right("Change"),
        TableColumn::right("Balance"),
    ]);
    for day in days {
        table.push_row(vec![
            day.date_str.clone(),
            day_events(day),
            change(day.change),
            amount(day.balance),
        ]);
    }
    table
}

fn render_summary<W: Write>(summary: &DashboardSummary, currency: &str, out: &mut W) -> Result<(), CliError> {
    writeln!(out, "{}", section(&format!("Summary {} ({currency})", summary.today)))?;
    writeln!(out, "{}", label_value("Total cash", amount(summary.total_cash)))?;
    writeln!(out, "{}", label_value("Card debt", amount(summary.total_card_debt)))?;
    writeln!(out, "{}", label_value("Investments", amount(summary.investment_value)))?;
    writeln!(out, "{}", label_value("Investment P/L", change(summary.investment_profit)))?;
    writeln!(out, "{}", label_value("Net worth", amount(summary.net_worth)))?;
    writeln!(out, "{}", label_value("Receivables", amount(summary.total_receivable)))?;
    if let (Some(min), Some(max)) = (summary.min_balance, summary.max_balance) {
        writeln!(out, "{}", label_value("Balance range", format!("{} .. {}", amount(min), amount(max))))?;
    }
    writeln!(out, "{}", section("Upcoming"))?;
    if summary.upcoming.is_empty() {
        writeln!(out, "Nothing due in the coming days.")?;
    } else {
        writeln!(out, "{}", projection_table(&summary.upcoming).render())?;
    }
    Ok(())
}

fn read_prices(path: &Path) -> Result<StaticPrices, CliError> {
    let data = fs::read_to_string(path)?;
    let raw: StaticPrices = serde_json::from_str(&data)?;
    Ok(raw
        .0
        .into_iter()
        .fold(StaticPrices::new(), |prices, (code, quote)| prices.with_quote(code, quote)))
}

fn write_json<T: Serialize + ?Sized, W: Write>(value: &T, out: &mut W) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn print_version<W: Write>(out: &mut W) -> Result<(), CliError> {
    let meta = build_info::current();
    writeln!(out, "cashflow_cli {}", meta.version)?;
    writeln!(out, "{}", label_value("Build hash", format!("{} ({})", meta.git_hash, meta.git_status)))?;
    writeln!(out, "{}", label_value("Built at", meta.timestamp.to_string()))?;
    writeln!(out, "{}", label_value("Target", meta.target.to_string()))?;
    writeln!(out, "{}", label_value("Profile", meta.profile.to_string()))?;
    writeln!(out, "{}", label_value("Rustc", meta.rustc.to_string()))?;
    Ok(())
}
