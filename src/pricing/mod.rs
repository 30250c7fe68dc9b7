//! Current unit prices for investment instruments.
//!
//! The feed itself is a collaborator behind [`PriceSource`]; this module only
//! normalizes its quotes into per-unit prices in the home currency.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::errors::PriceError;
use crate::ledger::Instrument;

/// Supplies the raw home-currency quote for a feed code (`xau`, `usd`, ...).
/// Metal quotes are per troy ounce.
pub trait PriceSource {
    fn quote(&self, feed_code: &str) -> Result<f64, PriceError>;
}

/// Fixed quotes, keyed by feed code.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct StaticPrices(pub HashMap<String, f64>);

impl StaticPrices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quote(mut self, feed_code: impl Into<String>, quote: f64) -> Self {
        self.0.insert(feed_code.into().to_lowercase(), quote);
        self
    }
}

impl PriceSource for StaticPrices {
    fn quote(&self, feed_code: &str) -> Result<f64, PriceError> {
        self.0
            .get(&feed_code.to_lowercase())
            .copied()
            .filter(|quote| *quote > 0.0)
            .ok_or_else(|| PriceError::Unavailable(feed_code.to_string()))
    }
}

/// Per-unit prices for the instruments that could be priced.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PriceBook {
    prices: BTreeMap<Instrument, f64>,
}

impl PriceBook {
    /// Queries each distinct feed code once and converts the quotes.
    ///
    /// A failed quote leaves its instruments unpriced instead of failing the
    /// whole batch; 22 karat gold shares the 24 karat quote.
    pub fn fetch<S: PriceSource + ?Sized>(
        source: &S,
        instruments: impl IntoIterator<Item = Instrument>,
    ) -> Self {
        let wanted: BTreeSet<Instrument> = instruments.into_iter().collect();
        let feed_codes: BTreeSet<&'static str> =
            wanted.iter().map(|instrument| instrument.feed_code()).collect();

        let mut quotes = HashMap::new();
        for code in feed_codes {
            match source.quote(code) {
                Ok(quote) => {
                    quotes.insert(code, quote);
                }
                Err(err) => {
                    tracing::warn!(feed_code = code, error = %err, "price quote unavailable");
                }
            }
        }

        let prices = wanted
            .into_iter()
            .filter_map(|instrument| {
                quotes
                    .get(instrument.feed_code())
                    .map(|quote| (instrument, instrument.unit_price(*quote)))
            })
            .collect();
        Self { prices }
    }

    pub fn get(&self, instrument: Instrument) -> Option<f64> {
        self.prices.get(&instrument).copied()
    }

    pub fn insert(&mut self, instrument: Instrument, unit_price: f64) {
        self.prices.insert(instrument, unit_price);
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
