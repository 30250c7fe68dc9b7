//! Ledger records as supplied by the backing store.

pub mod account;
pub mod card;
pub mod investment;
pub mod receivable;
pub mod scheduled;
pub mod snapshot;

pub use account::{total_balance, Account};
pub use card::{CardTransaction, CreditCard};
pub use investment::{
    Instrument, InvestmentAccount, InvestmentTrade, TradeSide, Unit, GRAMS_PER_TROY_OUNCE,
    KARAT_22_RATIO,
};
pub use receivable::{total_receivable, Debtor};
pub use scheduled::{EventKind, RecordedTransaction, ScheduledEvent, ScheduledPayment};
pub use snapshot::LedgerSnapshot;
