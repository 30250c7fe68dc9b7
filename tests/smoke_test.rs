mod common;

use cashflow_core::config::Config;
use cashflow_core::init;
use cashflow_core::ledger::{InvestmentTrade, TradeSide};
use cashflow_core::services::CashFlowService;
use cashflow_core::session::{MemorySessionStore, Session};
use cashflow_core::time::{Clock, ManualClock};
use chrono::{Duration, TimeZone, Utc};
use common::{date, household_snapshot};

#[test]
fn ledger_workflow_smoke() {
    init();

    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap());
    let config = Config::default();
    let mut session = Session::from_config(&clock, MemorySessionStore::new(), &config);
    assert!(session.login("hunter2", Some("hunter2")));

    let mut snapshot = household_snapshot();
    let debtor_id = snapshot.debtors[0].id;
    let remaining = snapshot
        .debtor_mut(debtor_id)
        .unwrap()
        .record_payment(250.0)
        .unwrap();
    assert_eq!(remaining, 500.0);

    let gold_id = snapshot.investment_accounts[0].id;
    let sell = InvestmentTrade::new(gold_id, TradeSide::Sell, 4.0, 2_500.0, date(2024, 3, 4))
        .unwrap();
    let sell_id = snapshot.record_trade(sell).unwrap();
    assert_eq!(snapshot.investment_accounts[0].quantity, 6.0);
    snapshot.remove_trade(sell_id).unwrap();
    assert_eq!(snapshot.investment_accounts[0].quantity, 10.0);
    assert_eq!(snapshot.investment_accounts[0].average_cost, 2_000.0);

    session.touch();
    let projection =
        CashFlowService::dashboard(&snapshot, clock.today(), &config).unwrap();
    assert_eq!(projection.days[0].date, date(2024, 3, 5));

    clock.advance(Duration::minutes(31));
    assert!(!session.check());
}
