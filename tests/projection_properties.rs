use approx::assert_relative_eq;
use cashflow_core::calc::{installment_details, profit_loss};
use cashflow_core::calendar::DateWindow;
use cashflow_core::cards::{
    due_date, next_statement_date, statement_date_for_transaction, CardObligation, StatementDay,
};
use cashflow_core::ledger::ScheduledEvent;
use cashflow_core::projection::{generate_projection, EventSource, ProjectionInput};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn busy_month() -> (Vec<ScheduledEvent>, Vec<CardObligation>, Vec<ScheduledEvent>) {
    let scheduled = vec![
        ScheduledEvent::income(date(2025, 4, 15), "Salary", 3_000.0),
        ScheduledEvent::expense(date(2025, 4, 15), "Rent", 1_100.0),
        ScheduledEvent::expense(date(2025, 4, 20), "Insurance", 90.5),
        ScheduledEvent::expense(date(2025, 5, 2), "Gym", 35.0),
        ScheduledEvent::expense(date(2025, 6, 1), "Outside window", 999.0),
    ];
    let obligations = vec![
        CardObligation::new("Gold", date(2025, 4, 21), 640.0),
        CardObligation::new("Platinum", date(2025, 4, 21), 120.0),
    ];
    let past = vec![
        ScheduledEvent::income(date(2025, 4, 3), "Freelance", 450.0),
        ScheduledEvent::expense(date(2025, 4, 8), "Groceries", 73.25),
    ];
    (scheduled, obligations, past)
}

#[test]
fn projecting_twice_gives_identical_output() {
    let (scheduled, obligations, past) = busy_month();
    let input =
        ProjectionInput::new(2_000.0, &scheduled, &obligations).with_past_transactions(&past);
    let window = DateWindow::new(date(2025, 4, 1), date(2025, 5, 10));
    let today = date(2025, 4, 12);
    let first = generate_projection(&input, window, today);
    let second = generate_projection(&input, window, today);
    assert_eq!(first, second);
}

#[test]
fn balance_follows_daily_change() {
    let (scheduled, obligations, past) = busy_month();
    let input =
        ProjectionInput::new(2_000.0, &scheduled, &obligations).with_past_transactions(&past);
    let projection = generate_projection(
        &input,
        DateWindow::new(date(2025, 4, 1), date(2025, 5, 10)),
        date(2025, 4, 12),
    );
    assert_relative_eq!(
        projection.days[0].balance,
        projection.starting_balance + projection.days[0].change
    );
    for pair in projection.days.windows(2) {
        assert_relative_eq!(pair[1].balance, pair[0].balance + pair[1].change, epsilon = 1e-9);
    }
}

#[test]
fn every_in_window_event_lands_on_exactly_one_day() {
    let (scheduled, obligations, _) = busy_month();
    let input = ProjectionInput::new(0.0, &scheduled, &obligations);
    let window = DateWindow::new(date(2025, 4, 1), date(2025, 5, 10));
    let projection = generate_projection(&input, window, date(2025, 4, 1));

    for event in scheduled.iter().filter(|event| window.contains(event.date)) {
        let hits: Vec<NaiveDate> = projection
            .days
            .iter()
            .filter(|day| {
                day.events
                    .iter()
                    .any(|entry| entry.description == event.description)
            })
            .map(|day| day.date)
            .collect();
        assert_eq!(hits, vec![event.date], "event {}", event.description);
    }
    for obligation in &obligations {
        let label = format!("{} card payment", obligation.card_name);
        let count: usize = projection
            .days
            .iter()
            .flat_map(|day| day.events.iter())
            .filter(|entry| entry.description == label)
            .count();
        assert_eq!(count, 1);
    }
    let total_events: usize = projection.days.iter().map(|day| day.events.len()).sum();
    assert_eq!(total_events, 4 + 2);
}

#[test]
fn past_events_before_today_each_land_once() {
    let today = date(2025, 4, 12);
    let scheduled = vec![ScheduledEvent::expense(date(2025, 4, 6), "Electricity", 80.0)];
    let past = vec![
        ScheduledEvent::income(date(2025, 4, 3), "Freelance", 450.0),
        ScheduledEvent::expense(date(2025, 4, 6), "Electricity", 80.0),
        ScheduledEvent::expense(date(2025, 4, 9), "Coffee", 5.0),
        ScheduledEvent::expense(date(2025, 4, 9), "Coffee", 5.0),
        ScheduledEvent::expense(date(2025, 3, 20), "Before window", 12.0),
    ];
    let input = ProjectionInput::new(1_000.0, &scheduled, &[]).with_past_transactions(&past);
    let window = DateWindow::new(date(2025, 4, 1), date(2025, 4, 20));
    let projection = generate_projection(&input, window, today);

    let count = |description: &str| -> usize {
        projection
            .days
            .iter()
            .flat_map(|day| day.events.iter())
            .filter(|event| event.description == description)
            .count()
    };
    assert_eq!(count("Freelance"), 1);
    assert_eq!(count("Electricity"), 1);
    assert_eq!(count("Coffee"), 2);
    assert_eq!(count("Before window"), 0);

    let freelance_day = projection.day(date(2025, 4, 3)).unwrap();
    assert_eq!(freelance_day.events[0].source, EventSource::PastTransaction);
    let electricity_day = projection.day(date(2025, 4, 6)).unwrap();
    assert_eq!(electricity_day.events.len(), 1);
    assert_eq!(electricity_day.events[0].source, EventSource::Scheduled);
    let coffee_day = projection.day(date(2025, 4, 9)).unwrap();
    assert!(coffee_day
        .events
        .iter()
        .all(|event| event.source == EventSource::PastTransaction));
    assert_relative_eq!(coffee_day.change, -10.0);
}

#[test]
fn due_date_lands_on_monday_after_weekend() {
    let fifteen = StatementDay::new(15).unwrap();
    assert_eq!(
        next_statement_date(fifteen, date(2024, 3, 1)).unwrap(),
        date(2024, 3, 15)
    );
    let due = due_date(fifteen, date(2024, 3, 1)).unwrap();
    assert_eq!(due, date(2024, 3, 25));
    assert_eq!(due.weekday(), Weekday::Mon);

    // 2024-03-13 + 10 days is a Saturday.
    let thirteen = StatementDay::new(13).unwrap();
    let raw = next_statement_date(thirteen, date(2024, 3, 1)).unwrap() + Duration::days(10);
    assert_eq!(raw.weekday(), Weekday::Sat);
    assert_eq!(
        due_date(thirteen, date(2024, 3, 1)).unwrap(),
        raw + Duration::days(2)
    );
}

#[test]
fn statement_day_purchase_stays_in_current_cycle() {
    let ten = StatementDay::new(10).unwrap();
    assert_eq!(
        statement_date_for_transaction(ten, date(2025, 7, 10)).unwrap(),
        date(2025, 7, 10)
    );
    assert_eq!(
        statement_date_for_transaction(ten, date(2025, 7, 11)).unwrap(),
        date(2025, 8, 10)
    );
}

#[test]
fn past_income_is_rewound_then_replayed() {
    let today = date(2025, 4, 12);
    let past = vec![ScheduledEvent::income(date(2025, 4, 5), "Bonus", 200.0)];
    let input = ProjectionInput::new(1_000.0, &[], &[]).with_past_transactions(&past);
    let projection = generate_projection(
        &input,
        DateWindow::new(date(2025, 4, 1), date(2025, 4, 20)),
        today,
    );
    assert_relative_eq!(projection.starting_balance, 800.0);
    let bonus = projection.day(date(2025, 4, 5)).unwrap();
    assert_eq!(bonus.events[0].source, EventSource::PastTransaction);
    let yesterday = projection.day(date(2025, 4, 11)).unwrap();
    assert_relative_eq!(yesterday.balance, 1_000.0);
    assert_relative_eq!(projection.day(today).unwrap().balance, 1_000.0);
}

#[test]
fn installment_progress_matches_schedule() {
    let first = installment_details(1_200.0, 12, 1);
    assert_relative_eq!(first.monthly_payment, 100.0);
    assert_relative_eq!(first.remaining_total, 1_200.0);
    assert_relative_eq!(first.paid_total, 0.0);
    assert_relative_eq!(first.progress_percent, 0.0);

    let last = installment_details(1_200.0, 12, 12);
    assert_relative_eq!(last.remaining_total, 100.0);
    assert_relative_eq!(last.paid_total, 1_100.0);
}

#[test]
fn zero_cost_basis_reports_zero_percent() {
    let result = profit_loss(10.0, 0.0, 50.0);
    assert_eq!(result.profit_percent, 0.0);
    assert_relative_eq!(result.profit, 500.0);
    assert!(result.is_profit);
}
