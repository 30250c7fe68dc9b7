use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calc::{installment_details, InstallmentDetails};
use crate::cards::StatementDay;
use crate::errors::ProjectionError;

fn one() -> u32 {
    1
}

fn default_currency() -> String {
    "TRY".into()
}

/// A credit card with its line items nested one level deep.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreditCard {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub total_limit: f64,
    pub statement_day: u32,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub transactions: Vec<CardTransaction>,
}

impl CreditCard {
    pub fn new(name: impl Into<String>, statement_day: u32, total_limit: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            bank_name: None,
            total_limit,
            statement_day,
            currency: default_currency(),
            transactions: Vec::new(),
        }
    }

    /// Validated statement day. Ledger rows are not sanitized upstream, so a
    /// stored value outside 1..=31 surfaces here.
    pub fn statement_day(&self) -> Result<StatementDay, ProjectionError> {
        StatementDay::new(self.statement_day)
    }

    pub fn add_transaction(&mut self, transaction: CardTransaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        id
    }

    pub fn transaction_mut(&mut self, id: Uuid) -> Option<&mut CardTransaction> {
        self.transactions.iter_mut().find(|txn| txn.id == id)
    }

    pub fn unpaid(&self) -> impl Iterator<Item = &CardTransaction> {
        self.transactions.iter().filter(|txn| !txn.is_paid)
    }

    /// Full outstanding principal, installments counted at their total.
    pub fn used_limit(&self) -> f64 {
        self.unpaid().map(|txn| txn.amount).sum()
    }

    pub fn available_limit(&self) -> f64 {
        self.total_limit - self.used_limit()
    }

    /// Amount owed on the current statement: installment purchases contribute
    /// one monthly slice.
    pub fn period_debt(&self) -> f64 {
        self.unpaid().map(CardTransaction::period_amount).sum()
    }

    pub fn earliest_unpaid_date(&self) -> Option<NaiveDate> {
        self.unpaid().map(|txn| txn.transaction_date).min()
    }
}

/// A single purchase on a card, optionally split into installments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardTransaction {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    pub transaction_date: NaiveDate,
    #[serde(default = "one")]
    pub installment_count: u32,
    #[serde(default = "one")]
    pub current_installment: u32,
    #[serde(default)]
    pub is_paid: bool,
}

impl CardTransaction {
    pub fn new(description: impl Into<String>, amount: f64, transaction_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            transaction_date,
            installment_count: 1,
            current_installment: 1,
            is_paid: false,
        }
    }

    pub fn with_installments(mut self, count: u32) -> Self {
        self.installment_count = count.max(1);
        self
    }

    pub fn is_installment(&self) -> bool {
        self.installment_count > 1
    }

    pub fn period_amount(&self) -> f64 {
        if self.is_installment() {
            self.amount / self.installment_count as f64
        } else {
            self.amount
        }
    }

    pub fn installment_details(&self) -> Option<InstallmentDetails> {
        self.is_installment().then(|| {
            installment_details(self.amount, self.installment_count, self.current_installment)
        })
    }

    pub fn mark_paid(&mut self) {
        self.is_paid = true;
    }
}
