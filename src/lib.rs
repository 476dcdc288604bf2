//! Storm Impact - health and economic rankings of storm event types
//!
//! Reads a NOAA-style storm event table, cleans event-type labels, decodes
//! damage magnitudes and ranks event types by their mean impact.

pub mod charts;
pub mod config;
pub mod data;
pub mod pipeline;
pub mod report;
pub mod stats;
