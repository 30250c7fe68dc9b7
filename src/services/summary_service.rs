use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calc::ProfitLoss;
use crate::config::Config;
use crate::ledger::{Instrument, LedgerSnapshot};
use crate::pricing::PriceBook;
use crate::projection::{Projection, ProjectionDay};

/// Valuation of one investment account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioLine {
    pub account_id: Uuid,
    pub name: String,
    pub instrument: Instrument,
    pub quantity: f64,
    pub average_cost: f64,
    /// `None` when no quote was available; the line is then valued at cost.
    pub unit_price: Option<f64>,
    pub profit_loss: ProfitLoss,
}

/// Headline figures for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    pub today: NaiveDate,
    pub total_cash: f64,
    pub total_card_debt: f64,
    pub investment_value: f64,
    pub investment_cost: f64,
    pub investment_profit: f64,
    /// Cash plus investments minus card debt. Receivables are excluded.
    pub net_worth: f64,
    pub total_receivable: f64,
    pub min_balance: Option<f64>,
    pub max_balance: Option<f64>,
    pub closing_balance: f64,
    pub upcoming: Vec<ProjectionDay>,
}

pub struct SummaryService;

impl SummaryService {
    pub fn portfolio(snapshot: &LedgerSnapshot, prices: &PriceBook) -> Vec<PortfolioLine> {
        snapshot
            .investment_accounts
            .iter()
            .map(|account| {
                let unit_price = prices.get(account.instrument);
                PortfolioLine {
                    account_id: account.id,
                    name: account.name.clone(),
                    instrument: account.instrument,
                    quantity: account.quantity,
                    average_cost: account.average_cost,
                    unit_price,
                    profit_loss: account.profit_loss(unit_price),
                }
            })
            .collect()
    }

    pub fn dashboard(
        snapshot: &LedgerSnapshot,
        prices: &PriceBook,
        projection: &Projection,
        config: &Config,
    ) -> DashboardSummary {
        let portfolio = Self::portfolio(snapshot, prices);
        let investment_value: f64 = portfolio
            .iter()
            .map(|line| line.profit_loss.current_value)
            .sum();
        let investment_cost: f64 = portfolio
            .iter()
            .map(|line| line.profit_loss.total_cost)
            .sum();
        let total_cash = snapshot.total_cash();
        let total_card_debt = snapshot.total_card_debt();

        DashboardSummary {
            today: projection.today,
            total_cash,
            total_card_debt,
            investment_value,
            investment_cost,
            investment_profit: investment_value - investment_cost,
            net_worth: total_cash + investment_value - total_card_debt,
            total_receivable: snapshot.total_receivable(),
            min_balance: projection.min_balance(),
            max_balance: projection.max_balance(),
            closing_balance: projection.closing_balance(),
            upcoming: projection
                .upcoming(config.upcoming_days)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}
