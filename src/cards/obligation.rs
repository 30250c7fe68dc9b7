use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::statement::{
    due_date, next_statement_date, statement_date_for_transaction, DUE_OFFSET_DAYS,
};
use crate::calendar::{add_days, shift_off_weekend};
use crate::errors::ProjectionError;
use crate::ledger::CreditCard;

/// How the due date derived from the earliest unpaid purchase is treated.
///
/// The fallback path (no unpaid purchases) always goes through
/// [`due_date`], which moves weekend dates to Monday.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DueDateRule {
    /// Weekend shift on both paths.
    #[default]
    WeekendShifted,
    /// Statement + offset with no weekend shift on the unpaid-purchase path.
    Unshifted,
}

/// Aggregated amount a card will pull from cash on its due date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardObligation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<Uuid>,
    pub card_name: String,
    pub due_date: NaiveDate,
    pub amount: f64,
}

impl CardObligation {
    pub fn new(card_name: impl Into<String>, due_date: NaiveDate, amount: f64) -> Self {
        Self {
            card_id: None,
            card_name: card_name.into(),
            due_date,
            amount,
        }
    }
}

/// Builds the card's obligation: the installment-aware unpaid total, due ten
/// days after the statement holding the earliest unpaid purchase.
pub fn card_obligation(
    card: &CreditCard,
    today: NaiveDate,
    rule: DueDateRule,
) -> Result<CardObligation, ProjectionError> {
    let statement_day = card.statement_day()?;
    let due = match card.earliest_unpaid_date() {
        Some(earliest) => {
            let statement = statement_date_for_transaction(statement_day, earliest)?;
            let raw = add_days(statement, DUE_OFFSET_DAYS);
            match rule {
                DueDateRule::WeekendShifted => shift_off_weekend(raw),
                DueDateRule::Unshifted => raw,
            }
        }
        None => {
            tracing::debug!(card = %card.name, "no unpaid purchases; using next statement due date");
            due_date(statement_day, today)?
        }
    };
    Ok(CardObligation {
        card_id: Some(card.id),
        card_name: card.name.clone(),
        due_date: due,
        amount: card.period_debt(),
    })
}

/// Obligations for every card that actually owes something.
pub fn projection_obligations<'a>(
    cards: impl IntoIterator<Item = &'a CreditCard>,
    today: NaiveDate,
    rule: DueDateRule,
) -> Result<Vec<CardObligation>, ProjectionError> {
    let mut obligations = Vec::new();
    for card in cards {
        let obligation = card_obligation(card, today, rule)?;
        if obligation.amount <= 0.0 {
            tracing::debug!(card = %card.name, "skipping card with nothing due");
            continue;
        }
        obligations.push(obligation);
    }
    Ok(obligations)
}

/// Statement the card is currently accumulating towards.
pub fn current_statement_date(
    card: &CreditCard,
    today: NaiveDate,
) -> Result<NaiveDate, ProjectionError> {
    let statement_day = card.statement_day()?;
    match card.earliest_unpaid_date() {
        Some(earliest) => statement_date_for_transaction(statement_day, earliest),
        None => next_statement_date(statement_day, today),
    }
}

/// Per-card figures shown in card listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardOverview {
    pub card_id: Uuid,
    pub name: String,
    pub total_limit: f64,
    pub used_limit: f64,
    pub available_limit: f64,
    pub period_debt: f64,
    pub statement_date: NaiveDate,
    pub due_date: NaiveDate,
}

pub fn card_overview(
    card: &CreditCard,
    today: NaiveDate,
    rule: DueDateRule,
) -> Result<CardOverview, ProjectionError> {
    let obligation = card_obligation(card, today, rule)?;
    Ok(CardOverview {
        card_id: card.id,
        name: card.name.clone(),
        total_limit: card.total_limit,
        used_limit: card.used_limit(),
        available_limit: card.available_limit(),
        period_debt: obligation.amount,
        statement_date: current_statement_date(card, today)?,
        due_date: obligation.due_date,
    })
}
