mod common;

use approx::assert_relative_eq;
use cashflow_core::calendar::DateWindow;
use cashflow_core::config::Config;
use cashflow_core::ledger::Instrument;
use cashflow_core::pricing::{PriceBook, StaticPrices};
use cashflow_core::projection::EventSource;
use cashflow_core::services::{CashFlowService, SummaryService};
use common::{date, household_snapshot};

#[test]
fn dashboard_projection_walks_the_next_thirty_days() {
    let snapshot = household_snapshot();
    let today = date(2024, 3, 5);
    let projection = CashFlowService::dashboard(&snapshot, today, &Config::default()).unwrap();

    assert_eq!(projection.len(), 30);
    assert_eq!(projection.window, DateWindow::new(today, date(2024, 4, 3)));
    assert_relative_eq!(projection.starting_balance, 5_000.0);
    assert_relative_eq!(projection.day(date(2024, 3, 7)).unwrap().balance, 3_500.0);
    assert_relative_eq!(projection.day(date(2024, 3, 15)).unwrap().balance, 7_000.0);

    let due = projection.day(date(2024, 3, 25)).unwrap();
    assert_eq!(due.events.len(), 1);
    assert_eq!(due.events[0].source, EventSource::CardPayment);
    assert_relative_eq!(due.events[0].amount, -350.0);
    assert_relative_eq!(projection.closing_balance(), 6_650.0);
}

#[test]
fn salary_period_rewinds_recorded_income() {
    let snapshot = household_snapshot();
    let today = date(2024, 3, 5);
    let projection =
        CashFlowService::salary_period(&snapshot, today, &Config::default()).unwrap();

    assert_eq!(projection.window, DateWindow::new(date(2024, 2, 15), date(2024, 4, 14)));
    assert_eq!(projection.len(), 60);
    assert_relative_eq!(projection.starting_balance, 4_400.0);
    assert_relative_eq!(projection.day(date(2024, 3, 1)).unwrap().balance, 5_000.0);
    assert_relative_eq!(projection.day(date(2024, 3, 7)).unwrap().balance, 3_500.0);
    assert_relative_eq!(projection.day(date(2024, 3, 15)).unwrap().balance, 7_000.0);
    assert_relative_eq!(projection.closing_balance(), 6_650.0);
}

#[test]
fn custom_window_respects_configured_salary_day() {
    let snapshot = household_snapshot();
    let config = Config {
        salary_day: 1,
        ..Config::default()
    };
    let projection =
        CashFlowService::salary_period(&snapshot, date(2024, 3, 5), &config).unwrap();
    assert_eq!(projection.window, DateWindow::new(date(2024, 3, 1), date(2024, 4, 30)));
}

#[test]
fn cards_without_debt_produce_no_obligation() {
    let snapshot = household_snapshot();
    let obligations =
        CashFlowService::obligations(&snapshot, date(2024, 3, 5), &Config::default()).unwrap();
    assert_eq!(obligations.len(), 1);
    assert_eq!(obligations[0].card_name, "Gold");

    let overviews =
        CashFlowService::card_overviews(&snapshot, date(2024, 3, 5), &Config::default()).unwrap();
    assert_eq!(overviews.len(), 2);
    let spare = overviews.iter().find(|card| card.name == "Spare").unwrap();
    assert_relative_eq!(spare.period_debt, 0.0);
    assert_eq!(spare.statement_date, date(2024, 4, 1));
}

#[test]
fn summary_values_gold_from_ounce_quote() {
    let snapshot = household_snapshot();
    let today = date(2024, 3, 5);
    let config = Config::default();
    let source = StaticPrices::new().with_quote("xau", 93_310.5);
    let prices = PriceBook::fetch(&source, [Instrument::Xau, Instrument::Xau22]);
    assert_relative_eq!(prices.get(Instrument::Xau).unwrap(), 3_000.0, epsilon = 1e-6);
    assert_relative_eq!(prices.get(Instrument::Xau22).unwrap(), 2_750.0, epsilon = 1e-6);

    let projection = CashFlowService::dashboard(&snapshot, today, &config).unwrap();
    let summary = SummaryService::dashboard(&snapshot, &prices, &projection, &config);
    assert_relative_eq!(summary.total_cash, 5_000.0);
    assert_relative_eq!(summary.total_card_debt, 1_450.0);
    assert_relative_eq!(summary.investment_value, 30_000.0, epsilon = 1e-6);
    assert_relative_eq!(summary.investment_profit, 10_000.0, epsilon = 1e-6);
    assert_relative_eq!(summary.net_worth, 33_550.0, epsilon = 1e-6);
    assert_relative_eq!(summary.total_receivable, 750.0);
    assert_eq!(summary.upcoming.len(), 1);
    assert_eq!(summary.upcoming[0].date, date(2024, 3, 7));
}
