use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::LedgerError;

/// Money owed to the user by someone else. Receivables are tracked apart
/// from net worth.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Debtor {
    pub id: Uuid,
    pub name: String,
    pub total_amount: f64,
    pub remaining_amount: f64,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Debtor {
    pub fn new(name: impl Into<String>, total_amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            total_amount,
            remaining_amount: total_amount,
            due_date: None,
            notes: None,
        }
    }

    pub fn paid_amount(&self) -> f64 {
        self.total_amount - self.remaining_amount
    }

    pub fn is_settled(&self) -> bool {
        self.remaining_amount <= 0.0
    }

    /// Records a repayment and returns the new remaining amount.
    pub fn record_payment(&mut self, amount: f64) -> Result<f64, LedgerError> {
        if amount <= 0.0 {
            return Err(LedgerError::Validation(
                "payment amount must be positive".into(),
            ));
        }
        if amount > self.remaining_amount {
            return Err(LedgerError::PaymentExceedsRemaining {
                amount,
                remaining: self.remaining_amount,
            });
        }
        self.remaining_amount -= amount;
        Ok(self.remaining_amount)
    }

    /// Changes the total owed, moving the remaining amount by the same delta
    /// but never below zero.
    pub fn set_total(&mut self, new_total: f64) {
        let delta = new_total - self.total_amount;
        self.total_amount = new_total;
        self.remaining_amount = (self.remaining_amount + delta).max(0.0);
    }
}

pub fn total_receivable<'a>(debtors: impl IntoIterator<Item = &'a Debtor>) -> f64 {
    debtors.into_iter().map(|debtor| debtor.remaining_amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payments_reduce_remaining() {
        let mut debtor = Debtor::new("Ali", 1_000.0);
        assert_eq!(debtor.record_payment(400.0).unwrap(), 600.0);
        assert_eq!(debtor.paid_amount(), 400.0);
        assert!(!debtor.is_settled());
        debtor.record_payment(600.0).unwrap();
        assert!(debtor.is_settled());
    }

    #[test]
    fn overpayment_is_rejected() {
        let mut debtor = Debtor::new("Ayse", 100.0);
        let err = debtor.record_payment(150.0).unwrap_err();
        assert!(matches!(err, LedgerError::PaymentExceedsRemaining { .. }));
        assert_eq!(debtor.remaining_amount, 100.0);
    }

    #[test]
    fn non_positive_payment_is_rejected() {
        let mut debtor = Debtor::new("Can", 100.0);
        assert!(matches!(
            debtor.record_payment(0.0),
            Err(LedgerError::Validation(_))
        ));
    }

    #[test]
    fn lowering_total_never_goes_negative() {
        let mut debtor = Debtor::new("Deniz", 500.0);
        debtor.record_payment(450.0).unwrap();
        debtor.set_total(300.0);
        assert_eq!(debtor.total_amount, 300.0);
        assert_eq!(debtor.remaining_amount, 0.0);

        let mut other = Debtor::new("Efe", 500.0);
        other.record_payment(100.0).unwrap();
        other.set_total(700.0);
        assert_eq!(other.remaining_amount, 600.0);
    }
}
