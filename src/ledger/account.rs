use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_currency() -> String {
    "TRY".into()
}

/// A bank or cash account whose balance is a snapshot at read time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub balance: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Account {
    /// Creates a new account with a zero balance.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            bank_name: None,
            balance: 0.0,
            currency: default_currency(),
            is_favorite: false,
        }
    }

    pub fn with_balance(mut self, balance: f64) -> Self {
        self.balance = balance;
        self
    }
}

/// Combined balance across accounts.
pub fn total_balance<'a>(accounts: impl IntoIterator<Item = &'a Account>) -> f64 {
    accounts.into_iter().map(|account| account.balance).sum()
}
