use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::DateWindow;
use crate::ledger::EventKind;

/// Where a projected event came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    Scheduled,
    PastTransaction,
    CardPayment,
}

/// One event landing on a projection day.
///
/// Scheduled and past events keep their positive magnitude; card payments
/// carry the negated obligation amount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayEvent {
    pub description: String,
    pub amount: f64,
    pub kind: EventKind,
    pub source: EventSource,
}

/// A single calendar day in the forecast.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectionDay {
    pub date: NaiveDate,
    /// `YYYY-MM-DD`.
    pub date_str: String,
    /// Short label such as `05 Mar`.
    pub formatted_date: String,
    pub events: Vec<DayEvent>,
    pub change: f64,
    pub balance: f64,
}

impl ProjectionDay {
    pub(crate) fn new(date: NaiveDate, events: Vec<DayEvent>, change: f64, balance: f64) -> Self {
        Self {
            date,
            date_str: date.format("%Y-%m-%d").to_string(),
            formatted_date: date.format("%d %b").to_string(),
            events,
            change,
            balance,
        }
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }
}

/// Day-by-day forecast over a window, plus the balance it started from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Projection {
    pub window: DateWindow,
    pub today: NaiveDate,
    /// Balance before the first day's change is applied.
    pub starting_balance: f64,
    pub days: Vec<ProjectionDay>,
}

impl Projection {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn closing_balance(&self) -> f64 {
        self.days
            .last()
            .map(|day| day.balance)
            .unwrap_or(self.starting_balance)
    }

    pub fn min_balance(&self) -> Option<f64> {
        self.days.iter().map(|day| day.balance).reduce(f64::min)
    }

    pub fn max_balance(&self) -> Option<f64> {
        self.days.iter().map(|day| day.balance).reduce(f64::max)
    }

    /// First day with the lowest balance.
    pub fn lowest_day(&self) -> Option<&ProjectionDay> {
        self.days.iter().fold(None, |lowest: Option<&ProjectionDay>, day| match lowest {
            Some(current) if current.balance <= day.balance => Some(current),
            _ => Some(day),
        })
    }

    /// Days among the first `horizon` that carry at least one event.
    pub fn upcoming(&self, horizon: usize) -> Vec<&ProjectionDay> {
        self.days
            .iter()
            .take(horizon)
            .filter(|day| day.has_events())
            .collect()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&ProjectionDay> {
        self.days.iter().find(|day| day.date == date)
    }
}
