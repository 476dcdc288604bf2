//! Data module - CSV loading, cleaning and damage decoding

pub mod loader;
pub mod magnitude;
pub mod processor;
mod record;

pub use loader::{DataLoader, LoaderError};
pub use magnitude::{decode_amount, decode_records, Magnitude};
pub use processor::DataProcessor;
pub use record::{DecodedRecord, EventRecord};
