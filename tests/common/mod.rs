#![allow(dead_code)]

use cashflow_core::ledger::{
    Account, CardTransaction, CreditCard, Debtor, EventKind, Instrument, InvestmentAccount,
    InvestmentTrade, LedgerSnapshot, RecordedTransaction, ScheduledPayment, TradeSide,
};
use chrono::NaiveDate;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Ledger used across integration suites, meant to be viewed on 2024-03-05.
pub fn household_snapshot() -> LedgerSnapshot {
    let mut snapshot = LedgerSnapshot::new();
    snapshot.add_account(Account::new("Checking").with_balance(4_000.0));
    snapshot.add_account(Account::new("Savings").with_balance(1_000.0));

    let mut gold_card = CreditCard::new("Gold", 15, 20_000.0);
    gold_card.add_transaction(CardTransaction::new("Market", 250.0, date(2024, 3, 2)));
    gold_card.add_transaction(
        CardTransaction::new("Phone", 1_200.0, date(2024, 3, 3)).with_installments(12),
    );
    snapshot.add_card(gold_card);
    snapshot.add_card(CreditCard::new("Spare", 1, 5_000.0));

    snapshot.add_scheduled_payment(ScheduledPayment::new(
        date(2024, 3, 7),
        "Rent",
        1_500.0,
        EventKind::Expense,
    ));
    snapshot.add_scheduled_payment(ScheduledPayment::new(
        date(2024, 3, 15),
        "Salary",
        3_500.0,
        EventKind::Income,
    ));
    snapshot.add_transaction(RecordedTransaction::new(
        date(2024, 3, 1),
        "Freelance",
        600.0,
        EventKind::Income,
    ));

    snapshot.add_debtor(Debtor::new("Deniz", 750.0));

    let gold_id = snapshot.add_investment_account(InvestmentAccount::new("Gold", Instrument::Xau));
    let trade = InvestmentTrade::new(gold_id, TradeSide::Buy, 10.0, 2_000.0, date(2024, 1, 10))
        .expect("valid trade");
    snapshot.record_trade(trade).expect("trade recorded");
    snapshot
}
