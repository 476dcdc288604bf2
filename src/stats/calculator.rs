//! Statistics Calculator Module
//! Per-category means of the health and damage metrics.

use crate::data::{DecodedRecord, EventRecord};
use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

/// Dollars per reported economic-score unit.
pub const MILLION: f64 = 1e6;

/// Means for one canonical category. `None` marks a metric with no eligible
/// values in that category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryAggregate {
    pub category: String,
    /// Records counted towards fatalities/injuries.
    pub health_count: usize,
    /// Records counted towards the damage metrics.
    pub economic_count: usize,
    pub fatalities: Option<f64>,
    pub injuries: Option<f64>,
    pub prop_damage: Option<f64>,
    pub crop_damage: Option<f64>,
    /// Mean of per-record property + crop damage, in dollars.
    pub total_damage: Option<f64>,
}

impl CategoryAggregate {
    /// Mean fatalities plus mean injuries.
    pub fn health_score(&self) -> Option<f64> {
        Some(self.fatalities? + self.injuries?)
    }

    /// Mean combined damage, in millions of dollars.
    pub fn economic_score(&self) -> Option<f64> {
        self.total_damage.map(|d| d / MILLION)
    }
}

#[derive(Default)]
struct Samples {
    health_count: usize,
    economic_count: usize,
    fatalities: Vec<f64>,
    injuries: Vec<f64>,
    prop_damage: Vec<f64>,
    crop_damage: Vec<f64>,
    total_damage: Vec<f64>,
}

/// Handles per-category statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Arithmetic mean, or `None` for an empty sample.
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            None
        } else {
            Some(values.iter().mean())
        }
    }

    /// Group by category and average every metric independently.
    ///
    /// `health` feeds fatalities/injuries; `economic` (records that passed
    /// suffix decoding) feeds the damage means. A missing value only drops
    /// out of its own metric.
    pub fn aggregate_by_category(
        health: &[EventRecord],
        economic: &[DecodedRecord],
    ) -> BTreeMap<String, CategoryAggregate> {
        let mut samples: BTreeMap<String, Samples> = BTreeMap::new();

        for r in health {
            let s = samples.entry(r.category.clone()).or_default();
            s.health_count += 1;
            s.fatalities.extend(r.fatalities.map(f64::from));
            s.injuries.extend(r.injuries.map(f64::from));
        }

        for r in economic {
            let s = samples.entry(r.category.clone()).or_default();
            s.economic_count += 1;
            s.prop_damage.extend(r.prop_damage);
            s.crop_damage.extend(r.crop_damage);
            s.total_damage.extend(r.total_damage());
        }

        samples
            .into_iter()
            .map(|(category, s)| {
                let aggregate = CategoryAggregate {
                    category: category.clone(),
                    health_count: s.health_count,
                    economic_count: s.economic_count,
                    fatalities: Self::mean(&s.fatalities),
                    injuries: Self::mean(&s.injuries),
                    prop_damage: Self::mean(&s.prop_damage),
                    crop_damage: Self::mean(&s.crop_damage),
                    total_damage: Self::mean(&s.total_damage),
                };
                (category, aggregate)
            })
            .collect()
    }
}
