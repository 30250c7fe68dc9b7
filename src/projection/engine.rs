use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::types::{DayEvent, EventSource, Projection, ProjectionDay};
use crate::calendar::DateWindow;
use crate::cards::CardObligation;
use crate::ledger::{EventKind, ScheduledEvent};

/// Length of the forecast when the caller does not choose a window.
pub const DEFAULT_PROJECTION_DAYS: u32 = 30;

/// Already-fetched inputs for one projection run.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionInput<'a> {
    /// Balance as of `today`.
    pub current_balance: f64,
    pub scheduled_events: &'a [ScheduledEvent],
    pub card_obligations: &'a [CardObligation],
    /// Events dated before `today`, used to rewind the balance to the start
    /// of a window that begins in the past.
    pub past_transactions: &'a [ScheduledEvent],
}

impl<'a> ProjectionInput<'a> {
    pub fn new(
        current_balance: f64,
        scheduled_events: &'a [ScheduledEvent],
        card_obligations: &'a [CardObligation],
    ) -> Self {
        Self {
            current_balance,
            scheduled_events,
            card_obligations,
            past_transactions: &[],
        }
    }

    pub fn with_past_transactions(mut self, past_transactions: &'a [ScheduledEvent]) -> Self {
        self.past_transactions = past_transactions;
        self
    }
}

/// Balance as it stood on `start`, obtained by undoing every past event dated
/// in `[start, today)`.
pub fn balance_at(
    current_balance: f64,
    past_transactions: &[ScheduledEvent],
    start: NaiveDate,
    today: NaiveDate,
) -> f64 {
    if start >= today {
        return current_balance;
    }
    let replayed: f64 = past_transactions
        .iter()
        .filter(|event| event.date >= start && event.date < today)
        .map(ScheduledEvent::signed_amount)
        .sum();
    current_balance - replayed
}

/// Builds the day-by-day forecast for `window`.
///
/// For each day the scheduled events are applied first. Past transactions
/// follow, on days before `today` only, skipping any whose description and
/// amount match a scheduled event that day. Card payments due that day come last.
/// A window whose end precedes its start produces no days.
pub fn generate_projection(
    input: &ProjectionInput<'_>,
    window: DateWindow,
    today: NaiveDate,
) -> Projection {
    let starting_balance = balance_at(
        input.current_balance,
        input.past_transactions,
        window.start,
        today,
    );

    let scheduled = by_date(input.scheduled_events, |event| event.date);
    let past = by_date(input.past_transactions, |event| event.date);
    let obligations = by_date(input.card_obligations, |obligation| obligation.due_date);

    let mut running_balance = starting_balance;
    let mut days = Vec::with_capacity(window.len_days());

    for date in window.days() {
        let mut events = Vec::new();
        let mut change = 0.0;

        for event in scheduled.get(&date).into_iter().flatten() {
            events.push(DayEvent {
                description: event.description.clone(),
                amount: event.amount,
                kind: event.kind,
                source: EventSource::Scheduled,
            });
            change += event.signed_amount();
        }

        if date < today {
            for event in past.get(&date).into_iter().flatten() {
                let duplicate = events.iter().any(|existing| {
                    existing.source == EventSource::Scheduled
                        && existing.description == event.description
                        && existing.amount == event.amount
                });
                if duplicate {
                    continue;
                }
                events.push(DayEvent {
                    description: event.description.clone(),
                    amount: event.amount,
                    kind: event.kind,
                    source: EventSource::PastTransaction,
                });
                change += event.signed_amount();
            }
        }

        for obligation in obligations.get(&date).into_iter().flatten() {
            events.push(DayEvent {
                description: format!("{} card payment", obligation.card_name),
                amount: -obligation.amount,
                kind: EventKind::Expense,
                source: EventSource::CardPayment,
            });
            change -= obligation.amount;
        }

        running_balance += change;
        days.push(ProjectionDay::new(date, events, change, running_balance));
    }

    tracing::debug!(
        start = %window.start,
        end = %window.end,
        %today,
        days = days.len(),
        starting_balance,
        "generated cash-flow projection"
    );

    Projection {
        window,
        today,
        starting_balance,
        days,
    }
}

/// Forecast for the default window: [`DEFAULT_PROJECTION_DAYS`] days from
/// `today`, with no balance reconstruction.
pub fn default_projection(
    current_balance: f64,
    scheduled_events: &[ScheduledEvent],
    card_obligations: &[CardObligation],
    today: NaiveDate,
) -> Projection {
    generate_projection(
        &ProjectionInput::new(current_balance, scheduled_events, card_obligations),
        DateWindow::starting_at(today, DEFAULT_PROJECTION_DAYS),
        today,
    )
}

fn by_date<T>(items: &[T], date_of: impl Fn(&T) -> NaiveDate) -> BTreeMap<NaiveDate, Vec<&T>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<&T>> = BTreeMap::new();
    for item in items {
        grouped.entry(date_of(item)).or_default().push(item);
    }
    grouped
}
