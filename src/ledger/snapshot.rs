use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    account::{total_balance, Account},
    card::CreditCard,
    investment::{InvestmentAccount, InvestmentTrade},
    receivable::{total_receivable, Debtor},
    scheduled::{RecordedTransaction, ScheduledPayment},
};
use crate::errors::LedgerError;

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Everything the ledger store hands over for one calculation pass.
///
/// The snapshot is a read model: the store stays the owner of these records,
/// and nothing here tries to keep them consistent across linked writes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub cards: Vec<CreditCard>,
    #[serde(default)]
    pub scheduled_payments: Vec<ScheduledPayment>,
    #[serde(default)]
    pub transactions: Vec<RecordedTransaction>,
    #[serde(default)]
    pub debtors: Vec<Debtor>,
    #[serde(default)]
    pub investment_accounts: Vec<InvestmentAccount>,
    #[serde(default)]
    pub investment_trades: Vec<InvestmentTrade>,
    #[serde(default = "LedgerSnapshot::schema_version_default")]
    pub schema_version: u8,
}

impl LedgerSnapshot {
    pub fn new() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            ..Self::default()
        }
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    pub fn add_account(&mut self, account: Account) -> Uuid {
        let id = account.id;
        self.accounts.push(account);
        id
    }

    pub fn add_card(&mut self, card: CreditCard) -> Uuid {
        let id = card.id;
        self.cards.push(card);
        id
    }

    pub fn add_scheduled_payment(&mut self, payment: ScheduledPayment) -> Uuid {
        let id = payment.id;
        self.scheduled_payments.push(payment);
        id
    }

    pub fn add_transaction(&mut self, transaction: RecordedTransaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        id
    }

    pub fn add_debtor(&mut self, debtor: Debtor) -> Uuid {
        let id = debtor.id;
        self.debtors.push(debtor);
        id
    }

    pub fn add_investment_account(&mut self, account: InvestmentAccount) -> Uuid {
        let id = account.id;
        self.investment_accounts.push(account);
        id
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn card(&self, id: Uuid) -> Option<&CreditCard> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn card_mut(&mut self, id: Uuid) -> Option<&mut CreditCard> {
        self.cards.iter_mut().find(|card| card.id == id)
    }

    pub fn debtor_mut(&mut self, id: Uuid) -> Option<&mut Debtor> {
        self.debtors.iter_mut().find(|debtor| debtor.id == id)
    }

    pub fn investment_account(&self, id: Uuid) -> Option<&InvestmentAccount> {
        self.investment_accounts
            .iter()
            .find(|account| account.id == id)
    }

    pub fn total_cash(&self) -> f64 {
        total_balance(&self.accounts)
    }

    /// Outstanding principal across all cards.
    pub fn total_card_debt(&self) -> f64 {
        self.cards.iter().map(CreditCard::used_limit).sum()
    }

    pub fn total_receivable(&self) -> f64 {
        total_receivable(&self.debtors)
    }

    /// Applies `trade` to its account and keeps it in the trade log.
    pub fn record_trade(&mut self, trade: InvestmentTrade) -> Result<Uuid, LedgerError> {
        let account = self
            .investment_accounts
            .iter_mut()
            .find(|account| account.id == trade.account_id)
            .ok_or_else(|| {
                LedgerError::InvalidRef(format!("investment account {}", trade.account_id))
            })?;
        account.apply(&trade)?;
        let id = trade.id;
        self.investment_trades.push(trade);
        Ok(id)
    }

    /// Removes a trade from the log and undoes its effect on the account.
    pub fn remove_trade(&mut self, trade_id: Uuid) -> Result<InvestmentTrade, LedgerError> {
        let position = self
            .investment_trades
            .iter()
            .position(|trade| trade.id == trade_id)
            .ok_or_else(|| LedgerError::InvalidRef(format!("investment trade {trade_id}")))?;
        let trade = &self.investment_trades[position];
        let account = self
            .investment_accounts
            .iter_mut()
            .find(|account| account.id == trade.account_id)
            .ok_or_else(|| {
                LedgerError::InvalidRef(format!("investment account {}", trade.account_id))
            })?;
        account.reverse(trade)?;
        Ok(self.investment_trades.remove(position))
    }
}
