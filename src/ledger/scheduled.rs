use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a cash movement. Amounts are always stored as magnitudes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Income,
    Expense,
}

impl EventKind {
    /// Applies the direction to a positive magnitude.
    pub fn signed(self, amount: f64) -> f64 {
        match self {
            EventKind::Income => amount,
            EventKind::Expense => -amount,
        }
    }
}

/// Dated income or expense as consumed by the projector. Scheduled payments,
/// future transactions and past transactions all flatten into this shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledEvent {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
}

impl ScheduledEvent {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: f64,
        kind: EventKind,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
            kind,
            account_id: None,
        }
    }

    pub fn income(date: NaiveDate, description: impl Into<String>, amount: f64) -> Self {
        Self::new(date, description, amount, EventKind::Income)
    }

    pub fn expense(date: NaiveDate, description: impl Into<String>, amount: f64) -> Self {
        Self::new(date, description, amount, EventKind::Expense)
    }

    pub fn signed_amount(&self) -> f64 {
        self.kind.signed(self.amount)
    }
}

/// A user-planned payment that stays pending until marked completed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledPayment {
    pub id: Uuid,
    pub payment_date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub kind: EventKind,
    #[serde(default)]
    pub account_id: Option<Uuid>,
    #[serde(default)]
    pub is_completed: bool,
}

impl ScheduledPayment {
    pub fn new(
        payment_date: NaiveDate,
        description: impl Into<String>,
        amount: f64,
        kind: EventKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            payment_date,
            description: description.into(),
            amount,
            kind,
            account_id: None,
            is_completed: false,
        }
    }

    pub fn mark_completed(&mut self) {
        self.is_completed = true;
    }

    pub fn is_pending(&self) -> bool {
        !self.is_completed
    }

    pub fn to_event(&self) -> ScheduledEvent {
        ScheduledEvent {
            date: self.payment_date,
            description: self.description.clone(),
            amount: self.amount,
            kind: self.kind,
            account_id: self.account_id,
        }
    }
}

/// A transaction already written to the ledger, past or future dated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordedTransaction {
    pub id: Uuid,
    pub transaction_date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub kind: EventKind,
    #[serde(default)]
    pub account_id: Option<Uuid>,
}

impl RecordedTransaction {
    pub fn new(
        transaction_date: NaiveDate,
        description: impl Into<String>,
        amount: f64,
        kind: EventKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            transaction_date,
            description: description.into(),
            amount,
            kind,
            account_id: None,
        }
    }

    pub fn to_event(&self) -> ScheduledEvent {
        ScheduledEvent {
            date: self.transaction_date,
            description: self.description.clone(),
            amount: self.amount,
            kind: self.kind,
            account_id: self.account_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_applies_sign() {
        assert_eq!(EventKind::Income.signed(25.0), 25.0);
        assert_eq!(EventKind::Expense.signed(25.0), -25.0);
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&EventKind::Expense).unwrap();
        assert_eq!(json, "\"expense\"");
    }

    #[test]
    fn payment_flattens_into_event() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let mut payment = ScheduledPayment::new(date, "Rent", 900.0, EventKind::Expense);
        assert!(payment.is_pending());
        let event = payment.to_event();
        assert_eq!(event.date, date);
        assert_eq!(event.signed_amount(), -900.0);
        payment.mark_completed();
        assert!(!payment.is_pending());
    }
}
