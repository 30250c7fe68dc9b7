use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calc::{profit_loss, ProfitLoss};
use crate::errors::LedgerError;

/// Grams in one troy ounce.
pub const GRAMS_PER_TROY_OUNCE: f64 = 31.1035;
/// Gold content of 22 karat relative to 24 karat.
pub const KARAT_22_RATIO: f64 = 22.0 / 24.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Gram,
    Piece,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Unit::Gram => "gram",
            Unit::Piece => "piece",
        })
    }
}

/// Instruments the portfolio can hold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Instrument {
    Xau,
    Xau22,
    Xag,
    Usd,
    Eur,
    Gbp,
}

impl Instrument {
    pub const ALL: [Instrument; 6] = [
        Instrument::Xau,
        Instrument::Xau22,
        Instrument::Xag,
        Instrument::Usd,
        Instrument::Eur,
        Instrument::Gbp,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Instrument::Xau => "XAU",
            Instrument::Xau22 => "XAU22",
            Instrument::Xag => "XAG",
            Instrument::Usd => "USD",
            Instrument::Eur => "EUR",
            Instrument::Gbp => "GBP",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Instrument::Xau => "Gold 24K (gram)",
            Instrument::Xau22 => "Gold 22K (gram)",
            Instrument::Xag => "Silver (gram)",
            Instrument::Usd => "US Dollar",
            Instrument::Eur => "Euro",
            Instrument::Gbp => "British Pound",
        }
    }

    /// Code the price feed knows this instrument by. 22 karat gold has no
    /// quote of its own and is derived from 24 karat.
    pub fn feed_code(self) -> &'static str {
        match self {
            Instrument::Xau | Instrument::Xau22 => "xau",
            Instrument::Xag => "xag",
            Instrument::Usd => "usd",
            Instrument::Eur => "eur",
            Instrument::Gbp => "gbp",
        }
    }

    pub fn unit(self) -> Unit {
        match self {
            Instrument::Xau | Instrument::Xau22 | Instrument::Xag => Unit::Gram,
            Instrument::Usd | Instrument::Eur | Instrument::Gbp => Unit::Piece,
        }
    }

    /// Whether feed quotes are per troy ounce and need converting to grams.
    pub fn quoted_per_ounce(self) -> bool {
        matches!(self, Instrument::Xau | Instrument::Xau22 | Instrument::Xag)
    }

    /// Multiplier applied to the base feed price after unit conversion.
    pub fn purity_ratio(self) -> f64 {
        match self {
            Instrument::Xau22 => KARAT_22_RATIO,
            _ => 1.0,
        }
    }

    /// Converts a raw feed quote into a price per [`Instrument::unit`].
    pub fn unit_price(self, feed_quote: f64) -> f64 {
        let per_unit = if self.quoted_per_ounce() {
            feed_quote / GRAMS_PER_TROY_OUNCE
        } else {
            feed_quote
        };
        per_unit * self.purity_ratio()
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Instrument {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Instrument::ALL
            .into_iter()
            .find(|instrument| instrument.code().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| LedgerError::InvalidRef(format!("unknown instrument `{value}`")))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

/// A buy or sell recorded against an investment account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvestmentTrade {
    pub id: Uuid,
    pub account_id: Uuid,
    pub side: TradeSide,
    pub quantity: f64,
    pub price_per_unit: f64,
    pub total_amount: f64,
    pub transaction_date: NaiveDate,
}

impl InvestmentTrade {
    pub fn new(
        account_id: Uuid,
        side: TradeSide,
        quantity: f64,
        price_per_unit: f64,
        transaction_date: NaiveDate,
    ) -> Result<Self, LedgerError> {
        if quantity <= 0.0 || price_per_unit <= 0.0 {
            return Err(LedgerError::Validation(
                "trade quantity and price must be positive".into(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            account_id,
            side,
            quantity,
            price_per_unit,
            total_amount: quantity * price_per_unit,
            transaction_date,
        })
    }
}

/// A holding of a single instrument tracked at average cost.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvestmentAccount {
    pub id: Uuid,
    pub name: String,
    pub instrument: Instrument,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub average_cost: f64,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub is_physical: bool,
}

impl InvestmentAccount {
    pub fn new(name: impl Into<String>, instrument: Instrument) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            instrument,
            quantity: 0.0,
            average_cost: 0.0,
            location: None,
            is_physical: false,
        }
    }

    pub fn total_cost(&self) -> f64 {
        self.quantity * self.average_cost
    }

    /// Market value at `price`, or at cost when no price is available.
    pub fn value_at(&self, price: Option<f64>) -> f64 {
        self.quantity * price.unwrap_or(self.average_cost)
    }

    pub fn profit_loss(&self, price: Option<f64>) -> ProfitLoss {
        profit_loss(
            self.quantity,
            self.average_cost,
            price.unwrap_or(self.average_cost),
        )
    }

    /// Applies a trade. Buys re-average the cost; sells keep it.
    pub fn apply(&mut self, trade: &InvestmentTrade) -> Result<(), LedgerError> {
        self.ensure_owns(trade)?;
        match trade.side {
            TradeSide::Buy => {
                let total_cost = self.total_cost() + trade.total_amount;
                self.quantity += trade.quantity;
                self.average_cost = if self.quantity > 0.0 {
                    total_cost / self.quantity
                } else {
                    0.0
                };
            }
            TradeSide::Sell => {
                if trade.quantity > self.quantity {
                    return Err(LedgerError::InsufficientQuantity {
                        requested: trade.quantity,
                        available: self.quantity,
                    });
                }
                self.quantity -= trade.quantity;
            }
        }
        Ok(())
    }

    /// Undoes a previously applied trade.
    pub fn reverse(&mut self, trade: &InvestmentTrade) -> Result<(), LedgerError> {
        self.ensure_owns(trade)?;
        match trade.side {
            TradeSide::Buy => {
                let remaining = self.quantity - trade.quantity;
                if remaining <= 0.0 {
                    self.quantity = 0.0;
                    self.average_cost = 0.0;
                } else {
                    let remaining_cost = self.total_cost() - trade.total_amount;
                    if remaining_cost > 0.0 {
                        self.average_cost = remaining_cost / remaining;
                    }
                    self.quantity = remaining;
                }
            }
            TradeSide::Sell => {
                self.quantity += trade.quantity;
            }
        }
        Ok(())
    }

    fn ensure_owns(&self, trade: &InvestmentTrade) -> Result<(), LedgerError> {
        if trade.account_id == self.id {
            Ok(())
        } else {
            Err(LedgerError::InvalidRef(format!(
                "trade {} belongs to account {}, not {}",
                trade.id, trade.account_id, self.id
            )))
        }
    }
}
