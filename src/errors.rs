use thiserror::Error;

/// Contract violations raised by the projection core.
///
/// These are never recovered from inside the crate: a bad statement day or a
/// malformed date aborts the single call and is returned to the caller as-is.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProjectionError {
    #[error("statement day must be between 1 and 31, got {0}")]
    InvalidStatementDay(u32),
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid reference: {0}")]
    InvalidRef(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Insufficient quantity: requested {requested:.4}, available {available:.4}")]
    InsufficientQuantity { requested: f64, available: f64 },
    #[error("Payment of {amount:.2} exceeds remaining balance {remaining:.2}")]
    PaymentExceedsRemaining { amount: f64, remaining: f64 },
    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

/// Failures reported by a price feed collaborator.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PriceError {
    #[error("no quote available for `{0}`")]
    Unavailable(String),
}
