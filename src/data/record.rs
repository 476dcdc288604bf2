//! Event Record Types
//! Row-level structures shared by the loader, processor and decoder.

use chrono::NaiveDateTime;

/// One storm event row as read from the input table.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    /// Event type label. Raw text until the processor canonicalizes it.
    pub category: String,
    /// Begin date of the event; `None` when the cell did not parse.
    pub date: Option<NaiveDateTime>,
    pub fatalities: Option<u32>,
    pub injuries: Option<u32>,
    pub prop_amount: Option<f64>,
    pub prop_code: String,
    pub crop_amount: Option<f64>,
    pub crop_code: String,
}

/// A record that survived unit-suffix filtering, with damage in dollars.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRecord {
    pub category: String,
    pub prop_damage: Option<f64>,
    pub crop_damage: Option<f64>,
}

impl DecodedRecord {
    /// Property plus crop damage, defined only when both amounts are.
    pub fn total_damage(&self) -> Option<f64> {
        Some(self.prop_damage? + self.crop_damage?)
    }
}
