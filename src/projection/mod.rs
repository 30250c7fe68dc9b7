//! Day-by-day cash-flow forecasting.

pub mod engine;
pub mod types;

pub use engine::{
    balance_at, default_projection, generate_projection, ProjectionInput,
    DEFAULT_PROJECTION_DAYS,
};
pub use types::{DayEvent, EventSource, Projection, ProjectionDay};
