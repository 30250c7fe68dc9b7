use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{add_days, clamped_date, next_month_of, shift_off_weekend};
use crate::errors::ProjectionError;

/// Calendar days between a statement closing and its payment due date.
pub const DUE_OFFSET_DAYS: i64 = 10;

/// Day of month (1..=31) on which a card's billing cycle closes.
///
/// Months shorter than the configured day close on their last day instead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u32", into = "u32")]
pub struct StatementDay(u32);

impl StatementDay {
    pub fn new(day: u32) -> Result<Self, ProjectionError> {
        if (1..=31).contains(&day) {
            Ok(Self(day))
        } else {
            Err(ProjectionError::InvalidStatementDay(day))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Statement date in the month of `reference`, or the month after when
    /// `roll_forward` holds.
    fn resolve(self, reference: NaiveDate, roll_forward: bool) -> Result<NaiveDate, ProjectionError> {
        let (year, month) = if roll_forward {
            next_month_of(reference.year(), reference.month())
        } else {
            (reference.year(), reference.month())
        };
        clamped_date(year, month, self.0).ok_or_else(|| {
            ProjectionError::InvalidDate(format!("{year}-{month:02}-{:02}", self.0))
        })
    }
}

impl TryFrom<u32> for StatementDay {
    type Error = ProjectionError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StatementDay> for u32 {
    fn from(value: StatementDay) -> Self {
        value.0
    }
}

impl fmt::Display for StatementDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Next statement closing on or after `reference`.
///
/// When `reference` falls on the statement day itself, that cycle is treated
/// as already closed and the following month is returned.
pub fn next_statement_date(
    statement_day: StatementDay,
    reference: NaiveDate,
) -> Result<NaiveDate, ProjectionError> {
    statement_day.resolve(reference, reference.day() >= statement_day.get())
}

/// Statement that a purchase made on `transaction_date` lands on.
///
/// A purchase posted on the statement day belongs to that same statement.
pub fn statement_date_for_transaction(
    statement_day: StatementDay,
    transaction_date: NaiveDate,
) -> Result<NaiveDate, ProjectionError> {
    statement_day.resolve(transaction_date, transaction_date.day() > statement_day.get())
}

/// Payment due date for the next statement after `reference`, moved off
/// weekends.
pub fn due_date(statement_day: StatementDay, reference: NaiveDate) -> Result<NaiveDate, ProjectionError> {
    let statement = next_statement_date(statement_day, reference)?;
    Ok(shift_off_weekend(add_days(statement, DUE_OFFSET_DAYS)))
}
