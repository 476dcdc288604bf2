//! Stats module - Per-category aggregation

mod calculator;

pub use calculator::{CategoryAggregate, StatsCalculator, MILLION};
