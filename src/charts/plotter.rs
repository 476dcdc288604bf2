//! Chart Plotter Module
//! Turns rankings and aggregates into render-ready chart data.

use crate::report::{Metric, Ranking};
use crate::stats::CategoryAggregate;
use plotters::style::RGBColor;
use std::collections::BTreeMap;

/// Bar fill for the health ranking.
pub const HEALTH_COLOR: RGBColor = RGBColor(231, 76, 60); // Red
/// Bar fill for the economic ranking.
pub const ECONOMIC_COLOR: RGBColor = RGBColor(46, 204, 113); // Green
/// Scatter marker color.
pub const POINT_COLOR: RGBColor = RGBColor(52, 152, 219); // Blue

/// A horizontal bar chart, bars already in display order (largest first).
#[derive(Debug, Clone)]
pub struct BarChartData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<(String, f64)>,
    pub color: RGBColor,
}

impl BarChartData {
    pub fn max_value(&self) -> f64 {
        self.bars.iter().map(|(_, v)| *v).fold(0.0, f64::max)
    }
}

/// One category in the health-vs-economic comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub category: String,
    pub health: f64,
    pub economic: f64,
    /// Only outliers get a text label, dense charts stay readable.
    pub labeled: bool,
}

#[derive(Debug, Clone)]
pub struct ScatterChartData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
}

/// Builds chart data from report results.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn health_bars(ranking: &Ranking) -> BarChartData {
        BarChartData {
            title: "Event types most harmful to population health".to_string(),
            x_label: Metric::HealthScore.display_name().to_string(),
            y_label: "Event type".to_string(),
            bars: ranking.clone(),
            color: HEALTH_COLOR,
        }
    }

    pub fn economic_bars(ranking: &Ranking) -> BarChartData {
        BarChartData {
            title: "Event types with greatest economic consequences".to_string(),
            x_label: Metric::EconomicScore.display_name().to_string(),
            y_label: "Event type".to_string(),
            bars: ranking.clone(),
            color: ECONOMIC_COLOR,
        }
    }

    /// Join health and economic scores per category.
    ///
    /// Categories missing either score are not plotted. A point is labeled
    /// when its health score exceeds `health_threshold` or its economic score
    /// exceeds `economic_threshold`.
    pub fn health_vs_economic(
        aggregates: &BTreeMap<String, CategoryAggregate>,
        health_threshold: f64,
        economic_threshold: f64,
    ) -> ScatterChartData {
        let points = aggregates
            .values()
            .filter_map(|agg| {
                let health = agg.health_score()?;
                let economic = agg.economic_score()?;
                Some(ScatterPoint {
                    category: agg.category.clone(),
                    health,
                    economic,
                    labeled: health > health_threshold || economic > economic_threshold,
                })
            })
            .collect();

        ScatterChartData {
            title: "Health impact vs economic impact by event type".to_string(),
            x_label: Metric::HealthScore.display_name().to_string(),
            y_label: Metric::EconomicScore.display_name().to_string(),
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agg(category: &str, f: f64, i: f64, total: Option<f64>) -> CategoryAggregate {
        CategoryAggregate {
            category: category.to_string(),
            fatalities: Some(f),
            injuries: Some(i),
            total_damage: total,
            ..Default::default()
        }
    }

    #[test]
    fn test_bar_data_keeps_order() {
        let ranking = vec![("heat".to_string(), 4.0), ("tornado".to_string(), 2.0)];
        let bars = ChartPlotter::health_bars(&ranking);
        assert_eq!(bars.bars, ranking);
        assert_eq!(bars.max_value(), 4.0);
        assert_eq!(bars.color, HEALTH_COLOR);
    }

    #[test]
    fn test_empty_bar_max_is_zero() {
        let bars = ChartPlotter::economic_bars(&Vec::new());
        assert_eq!(bars.max_value(), 0.0);
    }

    #[test]
    fn test_scatter_label_thresholds() {
        let aggregates: BTreeMap<String, CategoryAggregate> = vec![
            agg("quiet", 0.1, 0.2, Some(1e6)),
            agg("deadly", 1.0, 0.5, Some(0.0)),
            agg("costly", 0.0, 0.0, Some(11e6)),
            agg("edge", 0.5, 0.5, Some(10e6)),
            agg("no damage data", 3.0, 3.0, None),
        ]
        .into_iter()
        .map(|a| (a.category.clone(), a))
        .collect();

        let scatter = ChartPlotter::health_vs_economic(&aggregates, 1.0, 10.0);
        assert_eq!(scatter.points.len(), 4);

        let labeled: Vec<&str> = scatter
            .points
            .iter()
            .filter(|p| p.labeled)
            .map(|p| p.category.as_str())
            .collect();
        assert_eq!(labeled, vec!["costly", "deadly"]);
    }
}
