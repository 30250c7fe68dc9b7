use chrono::NaiveDate;

use crate::calendar::{salary_period, DateWindow};
use crate::cards::{card_overview, projection_obligations, CardObligation, CardOverview};
use crate::config::Config;
use crate::ledger::{LedgerSnapshot, ScheduledEvent};
use crate::projection::{generate_projection, Projection, ProjectionInput};

use super::{ServiceError, ServiceResult};

/// Feeds ledger snapshots into the projection engine.
pub struct CashFlowService;

impl CashFlowService {
    /// Forward-looking forecast starting today, without balance
    /// reconstruction. Recorded transactions dated today are assumed to be
    /// reflected in the account balances already.
    pub fn dashboard(
        snapshot: &LedgerSnapshot,
        today: NaiveDate,
        config: &Config,
    ) -> ServiceResult<Projection> {
        let mut scheduled: Vec<ScheduledEvent> = snapshot
            .scheduled_payments
            .iter()
            .filter(|payment| payment.is_pending() && payment.payment_date >= today)
            .map(|payment| payment.to_event())
            .collect();
        scheduled.extend(
            snapshot
                .transactions
                .iter()
                .filter(|txn| txn.transaction_date > today)
                .map(|txn| txn.to_event()),
        );
        let obligations = Self::obligations(snapshot, today, config)?;
        let input = ProjectionInput::new(snapshot.total_cash(), &scheduled, &obligations);
        let window = DateWindow::starting_at(today, config.projection_days);
        Ok(generate_projection(&input, window, today))
    }

    /// Forecast over the salary period containing `today`.
    pub fn salary_period(
        snapshot: &LedgerSnapshot,
        today: NaiveDate,
        config: &Config,
    ) -> ServiceResult<Projection> {
        let window = salary_period(today, config.salary_day)?;
        Self::custom(snapshot, today, window, config)
    }

    /// Forecast over an explicit window, rewinding the balance to its start
    /// when it begins before `today`.
    pub fn custom(
        snapshot: &LedgerSnapshot,
        today: NaiveDate,
        window: DateWindow,
        config: &Config,
    ) -> ServiceResult<Projection> {
        if window.is_empty() {
            tracing::debug!(start = %window.start, end = %window.end, "empty projection window");
        }

        let mut scheduled: Vec<ScheduledEvent> = snapshot
            .scheduled_payments
            .iter()
            .filter(|payment| {
                payment.is_pending()
                    && payment.payment_date >= today
                    && payment.payment_date <= window.end
            })
            .map(|payment| payment.to_event())
            .collect();

        let mut past = Vec::new();
        for txn in snapshot
            .transactions
            .iter()
            .filter(|txn| window.contains(txn.transaction_date))
        {
            if txn.transaction_date < today {
                past.push(txn.to_event());
            } else {
                scheduled.push(txn.to_event());
            }
        }

        let obligations = Self::obligations(snapshot, today, config)?;
        let input = ProjectionInput::new(snapshot.total_cash(), &scheduled, &obligations)
            .with_past_transactions(&past);
        Ok(generate_projection(&input, window, today))
    }

    /// Builds an explicit window from user-supplied bounds.
    pub fn window(start: NaiveDate, end: NaiveDate) -> ServiceResult<DateWindow> {
        if end < start {
            return Err(ServiceError::Invalid(format!(
                "window end {end} precedes start {start}"
            )));
        }
        Ok(DateWindow::new(start, end))
    }

    pub fn obligations(
        snapshot: &LedgerSnapshot,
        today: NaiveDate,
        config: &Config,
    ) -> ServiceResult<Vec<CardObligation>> {
        Ok(projection_obligations(
            &snapshot.cards,
            today,
            config.due_date_rule,
        )?)
    }

    pub fn card_overviews(
        snapshot: &LedgerSnapshot,
        today: NaiveDate,
        config: &Config,
    ) -> ServiceResult<Vec<CardOverview>> {
        snapshot
            .cards
            .iter()
            .map(|card| card_overview(card, today, config.due_date_rule).map_err(ServiceError::from))
            .collect()
    }
}
