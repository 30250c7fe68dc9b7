#![doc(test(attr(deny(warnings))))]

//! Cash-flow core: credit card statement rules, card obligations and a
//! day-by-day balance projection over a personal finance ledger.

pub mod calc;
pub mod calendar;
pub mod cards;
pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod pricing;
pub mod projection;
pub mod services;
pub mod session;
pub mod time;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Installs the global tracing subscriber; later calls are no-ops.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("cashflow core tracing initialized");
    });
}
