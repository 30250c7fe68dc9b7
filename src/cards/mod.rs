//! Credit card statement rules and the obligations they produce.

pub mod obligation;
pub mod statement;

pub use obligation::{
    card_obligation, card_overview, current_statement_date, projection_obligations,
    CardObligation, CardOverview, DueDateRule,
};
pub use statement::{
    due_date, next_statement_date, statement_date_for_transaction, StatementDay, DUE_OFFSET_DAYS,
};
