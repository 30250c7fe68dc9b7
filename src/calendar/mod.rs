//! Calendar-day helpers over immutable [`NaiveDate`] values.
//!
//! Every date in the crate is a plain calendar day. Time of day never
//! participates in a comparison, so callers holding timestamps should go
//! through [`parse_date`] or `DateTime::date_naive` first.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::errors::ProjectionError;

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

pub fn day_of_week(date: NaiveDate) -> Weekday {
    date.weekday()
}

/// Signed number of calendar days from `start` to `end`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = next_month_of(year, month);
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// Builds `year-month-day`, pulling `day` back to the month's last day when
/// the month is shorter.
pub fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let day = day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Moves `date` by whole months, clamping the day of month.
pub fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let index = date.year() * 12 + date.month0() as i32 + months;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    clamped_date(year, month, date.day())
}

pub(crate) fn next_month_of(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// Pushes Saturdays and Sundays forward to the following Monday.
pub fn shift_off_weekend(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => add_days(date, 2),
        Weekday::Sun => add_days(date, 1),
        _ => date,
    }
}

/// Parses a ledger date. Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive
/// `YYYY-MM-DDTHH:MM:SS` timestamps; the time component is discarded.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ProjectionError> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(stamp.date_naive());
    }
    if let Ok(stamp) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(stamp.date());
    }
    Err(ProjectionError::InvalidDate(raw.to_string()))
}

/// Inclusive calendar window `[start, end]`. A window whose end precedes its
/// start is valid and simply holds no days.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Window of `days` calendar days beginning at `start`.
    pub fn starting_at(start: NaiveDate, days: u32) -> Self {
        Self {
            start,
            end: add_days(start, days as i64 - 1),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn len_days(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            days_between(self.start, self.end) as usize + 1
        }
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start
            .iter_days()
            .take(self.len_days())
            .take_while(move |day| *day <= end)
    }
}

/// Pay-cycle window anchored on `anchor_day`.
///
/// On or after the anchor day the window runs from this month's anchor day to
/// the day before the anchor two months out; before it, the window starts at
/// last month's anchor and ends the day before next month's anchor.
pub fn salary_period(today: NaiveDate, anchor_day: u32) -> Result<DateWindow, ProjectionError> {
    if !(1..=31).contains(&anchor_day) {
        return Err(ProjectionError::InvalidInput(format!(
            "salary anchor day must be between 1 and 31, got {anchor_day}"
        )));
    }
    let this_month = start_of_month(today);
    let (start_offset, end_offset) = if today.day() >= anchor_day {
        (0, 2)
    } else {
        (-1, 1)
    };
    let start_month = shift_months(this_month, start_offset);
    let end_month = shift_months(this_month, end_offset);
    let (Some(start_month), Some(end_month)) = (start_month, end_month) else {
        return Err(ProjectionError::InvalidDate(today.to_string()));
    };
    let start = clamped_date(start_month.year(), start_month.month(), anchor_day);
    let end = clamped_date(end_month.year(), end_month.month(), anchor_day)
        .and_then(|anchor| anchor.pred_opt());
    match (start, end) {
        (Some(start), Some(end)) => Ok(DateWindow::new(start, end)),
        _ => Err(ProjectionError::InvalidDate(today.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2025, 12), 31);
        assert_eq!(days_in_month(2025, 4), 30);
    }

    #[test]
    fn shift_months_clamps_day_of_month() {
        assert_eq!(shift_months(date(2025, 1, 31), 1), Some(date(2025, 2, 28)));
        assert_eq!(shift_months(date(2025, 1, 15), -1), Some(date(2024, 12, 15)));
        assert_eq!(shift_months(date(2024, 11, 30), 3), Some(date(2025, 2, 28)));
    }

    #[test]
    fn weekend_dates_move_to_monday() {
        // 2024-03-23 is a Saturday.
        assert_eq!(shift_off_weekend(date(2024, 3, 23)), date(2024, 3, 25));
        assert_eq!(shift_off_weekend(date(2024, 3, 24)), date(2024, 3, 25));
        assert_eq!(shift_off_weekend(date(2024, 3, 22)), date(2024, 3, 22));
    }

    #[test]
    fn parse_date_ignores_time_of_day() {
        assert_eq!(parse_date("2025-03-04").unwrap(), date(2025, 3, 4));
        assert_eq!(
            parse_date("2025-03-04T18:30:00+00:00").unwrap(),
            date(2025, 3, 4)
        );
        assert_eq!(
            parse_date("2025-03-04T23:59:59.120").unwrap(),
            date(2025, 3, 4)
        );
        assert!(matches!(
            parse_date("04/03/2025"),
            Err(ProjectionError::InvalidDate(_))
        ));
    }

    #[test]
    fn window_iterates_inclusive_days() {
        let window = DateWindow::new(date(2025, 1, 30), date(2025, 2, 2));
        let days: Vec<_> = window.days().collect();
        assert_eq!(days.len(), 4);
        assert_eq!(days.first(), Some(&date(2025, 1, 30)));
        assert_eq!(days.last(), Some(&date(2025, 2, 2)));
        assert_eq!(window.len_days(), 4);
    }

    #[test]
    fn reversed_window_is_empty() {
        let window = DateWindow::new(date(2025, 2, 2), date(2025, 1, 30));
        assert!(window.is_empty());
        assert_eq!(window.days().count(), 0);
    }

    #[test]
    fn salary_period_after_anchor_spans_two_months() {
        let window = salary_period(date(2025, 3, 20), 15).unwrap();
        assert_eq!(window.start, date(2025, 3, 15));
        assert_eq!(window.end, date(2025, 5, 14));
    }

    #[test]
    fn salary_period_before_anchor_starts_last_month() {
        let window = salary_period(date(2025, 1, 3), 15).unwrap();
        assert_eq!(window.start, date(2024, 12, 15));
        assert_eq!(window.end, date(2025, 2, 14));
    }

    #[test]
    fn salary_period_rejects_bad_anchor() {
        assert!(salary_period(date(2025, 1, 3), 0).is_err());
        assert!(salary_period(date(2025, 1, 3), 32).is_err());
    }
}
