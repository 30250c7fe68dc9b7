pub mod cash_flow_service;
pub mod summary_service;

pub use cash_flow_service::CashFlowService;
pub use summary_service::{DashboardSummary, PortfolioLine, SummaryService};

use crate::errors::{LedgerError, ProjectionError};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Projection(#[from] ProjectionError),
    #[error("{0}")]
    Invalid(String),
}
