//! Rankings over the per-category aggregates.

pub mod format;

pub use format::{format_metric_table, format_report};

use crate::stats::CategoryAggregate;
use serde::Serialize;
use std::collections::BTreeMap;

/// A rankable per-category value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Fatalities,
    Injuries,
    PropertyDamage,
    CropDamage,
    /// Mean fatalities + mean injuries.
    HealthScore,
    /// Mean property + crop damage, millions of dollars.
    EconomicScore,
}

impl Metric {
    pub fn value(self, agg: &CategoryAggregate) -> Option<f64> {
        match self {
            Metric::Fatalities => agg.fatalities,
            Metric::Injuries => agg.injuries,
            Metric::PropertyDamage => agg.prop_damage,
            Metric::CropDamage => agg.crop_damage,
            Metric::HealthScore => agg.health_score(),
            Metric::EconomicScore => agg.economic_score(),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Metric::Fatalities => "Mean fatalities",
            Metric::Injuries => "Mean injuries",
            Metric::PropertyDamage => "Mean property damage ($)",
            Metric::CropDamage => "Mean crop damage ($)",
            Metric::HealthScore => "Fatalities + injuries (mean)",
            Metric::EconomicScore => "Property + crop damage (mean, $M)",
        }
    }
}

/// `(category, value)` pairs in ranking order.
pub type Ranking = Vec<(String, f64)>;

/// Top `n` categories by `metric`, highest first.
///
/// Ties fall back to lexical category order; categories without a value for
/// the metric are left out.
pub fn top_n(
    aggregates: &BTreeMap<String, CategoryAggregate>,
    metric: Metric,
    n: usize,
) -> Ranking {
    let mut ranked: Ranking = aggregates
        .iter()
        .filter_map(|(category, agg)| {
            metric
                .value(agg)
                .filter(|v| !v.is_nan())
                .map(|v| (category.clone(), v))
        })
        .collect();

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}

/// Every ranking the report prints or draws.
#[derive(Debug, Clone, Serialize)]
pub struct Rankings {
    pub fatalities: Ranking,
    pub injuries: Ranking,
    pub prop_damage: Ranking,
    pub crop_damage: Ranking,
    pub health: Ranking,
    pub economic: Ranking,
}

/// Build the four top-`table_n` tables and the two top-`chart_n` score
/// rankings used by the bar charts.
pub fn build_rankings(
    aggregates: &BTreeMap<String, CategoryAggregate>,
    table_n: usize,
    chart_n: usize,
) -> Rankings {
    Rankings {
        fatalities: top_n(aggregates, Metric::Fatalities, table_n),
        injuries: top_n(aggregates, Metric::Injuries, table_n),
        prop_damage: top_n(aggregates, Metric::PropertyDamage, table_n),
        crop_damage: top_n(aggregates, Metric::CropDamage, table_n),
        health: top_n(aggregates, Metric::HealthScore, chart_n),
        economic: top_n(aggregates, Metric::EconomicScore, chart_n),
    }
}

/// Machine-readable dump written next to the charts.
#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub records_loaded: usize,
    pub health_records: usize,
    pub economic_records: usize,
    pub rankings: &'a Rankings,
    pub categories: Vec<&'a CategoryAggregate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataProcessor, DecodedRecord, EventRecord};
    use crate::stats::StatsCalculator;

    fn agg(category: &str, fatalities: Option<f64>, injuries: Option<f64>) -> CategoryAggregate {
        CategoryAggregate {
            category: category.to_string(),
            fatalities,
            injuries,
            ..Default::default()
        }
    }

    fn map(aggs: Vec<CategoryAggregate>) -> BTreeMap<String, CategoryAggregate> {
        aggs.into_iter().map(|a| (a.category.clone(), a)).collect()
    }

    fn event(category: &str, fatalities: u32, injuries: u32, prop: (f64, &str)) -> EventRecord {
        EventRecord {
            category: category.to_string(),
            date: crate::data::loader::parse_date("3/1/2006 0:00:00"),
            fatalities: Some(fatalities),
            injuries: Some(injuries),
            prop_amount: Some(prop.0),
            prop_code: prop.1.to_string(),
            crop_amount: Some(0.0),
            crop_code: "K".to_string(),
        }
    }

    fn rank_records(records: &[EventRecord], metric: Metric) -> Ranking {
        let decoded: Vec<DecodedRecord> = crate::data::decode_records(records);
        let aggs = StatsCalculator::aggregate_by_category(records, &decoded);
        top_n(&aggs, metric, 5)
    }

    #[test]
    fn test_top_n_descending() {
        let aggs = map(vec![
            agg("hail", Some(1.0), None),
            agg("heat", Some(9.0), None),
            agg("flood", Some(4.0), None),
        ]);

        let ranked = top_n(&aggs, Metric::Fatalities, 2);
        assert_eq!(
            ranked,
            vec![("heat".to_string(), 9.0), ("flood".to_string(), 4.0)]
        );
    }

    #[test]
    fn test_top_n_ties_lexical() {
        let aggs = map(vec![
            agg("tornado", Some(2.0), None),
            agg("avalanche", Some(2.0), None),
            agg("hail", Some(2.0), None),
        ]);

        let names: Vec<String> = top_n(&aggs, Metric::Fatalities, 5)
            .into_iter()
            .map(|(c, _)| c)
            .collect();
        assert_eq!(names, vec!["avalanche", "hail", "tornado"]);
    }

    #[test]
    fn test_top_n_skips_undefined() {
        let aggs = map(vec![agg("heat", None, Some(3.0)), agg("hail", Some(1.0), Some(0.0))]);

        let ranked = top_n(&aggs, Metric::Fatalities, 5);
        assert_eq!(ranked, vec![("hail".to_string(), 1.0)]);

        let health = top_n(&aggs, Metric::HealthScore, 5);
        assert_eq!(health, vec![("hail".to_string(), 1.0)]);
    }

    #[test]
    fn test_top_n_stable_under_permutation() {
        let records = vec![
            event("tornado", 4, 10, (2.0, "M")),
            event("flood", 1, 3, (8.0, "M")),
            event("hail", 4, 10, (2.0, "M")),
            event("tornado", 2, 2, (1.0, "B")),
            event("heat", 6, 0, (1.0, "X")),
        ];
        let mut reversed = records.clone();
        reversed.reverse();
        let mut rotated = records.clone();
        rotated.rotate_left(2);

        for metric in [Metric::Fatalities, Metric::Injuries, Metric::EconomicScore] {
            let base = rank_records(&records, metric);
            assert_eq!(base, rank_records(&reversed, metric));
            assert_eq!(base, rank_records(&rotated, metric));
        }
    }

    #[test]
    fn test_end_to_end_synonyms_collapse() {
        let raw = vec![
            EventRecord {
                category: "tstm wind".to_string(),
                date: crate::data::loader::parse_date("5/5/2005 0:00:00"),
                fatalities: Some(2),
                injuries: Some(5),
                prop_amount: None,
                prop_code: String::new(),
                crop_amount: None,
                crop_code: String::new(),
            },
            EventRecord {
                category: "thunderstorm wind".to_string(),
                date: crate::data::loader::parse_date("5/5/2006 0:00:00"),
                fatalities: Some(4),
                injuries: Some(1),
                prop_amount: None,
                prop_code: String::new(),
                crop_amount: None,
                crop_code: String::new(),
            },
        ];

        let cleaned = DataProcessor::clean(
            &raw,
            crate::data::processor::default_cutoff(),
            &crate::data::processor::EXCLUDED_CATEGORIES,
        );
        let decoded = crate::data::decode_records(&cleaned);
        let aggs = StatsCalculator::aggregate_by_category(&cleaned, &decoded);

        assert_eq!(aggs.len(), 1);
        assert_eq!(aggs["tstm wind"].fatalities, Some(3.0));
        assert_eq!(aggs["tstm wind"].injuries, Some(3.0));
        assert_eq!(aggs["tstm wind"].prop_damage, None);
        assert_eq!(
            top_n(&aggs, Metric::Fatalities, 5),
            vec![("tstm wind".to_string(), 3.0)]
        );
    }

    #[test]
    fn test_build_rankings_lengths() {
        let aggs = map(
            (0..8)
                .map(|i| agg(&format!("cat{i}"), Some(i as f64), Some(1.0)))
                .collect(),
        );

        let rankings = build_rankings(&aggs, 5, 7);
        assert_eq!(rankings.fatalities.len(), 5);
        assert_eq!(rankings.health.len(), 7);
        assert_eq!(rankings.health[0], ("cat7".to_string(), 8.0));
        assert!(rankings.prop_damage.is_empty());
    }
}
