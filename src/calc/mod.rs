//! Stateless arithmetic for installment plans and investment returns.

use serde::{Deserialize, Serialize};

/// Breakdown of an installment purchase at a given installment index.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct InstallmentDetails {
    pub monthly_payment: f64,
    pub remaining_count: u32,
    pub remaining_total: f64,
    pub paid_total: f64,
    pub progress_percent: f64,
}

/// Splits `total_amount` into `installment_count` equal payments and reports
/// progress as of `current_index` (1-based: index 1 means nothing paid yet).
///
/// A zero `installment_count` yields all-zero figures instead of dividing by
/// zero. `current_index` values past the end report zero remaining.
pub fn installment_details(
    total_amount: f64,
    installment_count: u32,
    current_index: u32,
) -> InstallmentDetails {
    if installment_count == 0 {
        return InstallmentDetails {
            monthly_payment: 0.0,
            remaining_count: 0,
            remaining_total: 0.0,
            paid_total: 0.0,
            progress_percent: 0.0,
        };
    }
    let count = installment_count as f64;
    let monthly_payment = total_amount / count;
    let paid_count = current_index.saturating_sub(1);
    let remaining_count = (installment_count + 1).saturating_sub(current_index);
    InstallmentDetails {
        monthly_payment,
        remaining_count,
        remaining_total: monthly_payment * remaining_count as f64,
        paid_total: monthly_payment * paid_count as f64,
        progress_percent: paid_count as f64 / count * 100.0,
    }
}

/// Valuation of a holding against its cost basis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ProfitLoss {
    pub total_cost: f64,
    pub current_value: f64,
    pub profit: f64,
    pub profit_percent: f64,
    pub is_profit: bool,
}

pub fn profit_loss(quantity: f64, unit_cost_basis: f64, current_unit_price: f64) -> ProfitLoss {
    let total_cost = quantity * unit_cost_basis;
    let current_value = quantity * current_unit_price;
    let profit = current_value - total_cost;
    let profit_percent = if total_cost > 0.0 {
        profit / total_cost * 100.0
    } else {
        0.0
    };
    ProfitLoss {
        total_cost,
        current_value,
        profit,
        profit_percent,
        is_profit: profit >= 0.0,
    }
}
