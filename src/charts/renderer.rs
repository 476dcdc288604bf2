//! Static Chart Renderer
//! Draws the ranking bar charts and the comparison scatter to PNG files.
//!
//! Layout:
//! 1. Bar charts: horizontal bars, largest at the top, category names on the
//!    y-axis and the score on the x-axis.
//! 2. Scatter: health score on x, economic score on y, outliers labeled.

use crate::charts::{BarChartData, ScatterChartData, POINT_COLOR};
use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

const FONT: &str = "sans-serif";
const CAPTION_SIZE: u32 = 24;
const LABEL_SIZE: u32 = 14;
const POINT_RADIUS: u32 = 4;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to draw {path}: {message}")]
    Drawing { path: String, message: String },
}

pub struct StaticChartRenderer {
    width: u32,
    height: u32,
}

impl StaticChartRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Render a horizontal bar chart to `path`.
    pub fn render_bar_chart(&self, data: &BarChartData, path: &Path) -> Result<(), ChartError> {
        self.draw_bars(data, path).map_err(|e| ChartError::Drawing {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Render the health-vs-economic scatter to `path`.
    pub fn render_scatter(&self, data: &ScatterChartData, path: &Path) -> Result<(), ChartError> {
        self.draw_scatter(data, path).map_err(|e| ChartError::Drawing {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn draw_bars(
        &self,
        data: &BarChartData,
        path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let n = data.bars.len().max(1);
        let x_max = Self::padded_max(data.max_value());

        // Row 0 is drawn at the bottom, so the first (largest) bar gets the
        // highest row index.
        let names: Vec<String> = data.bars.iter().rev().map(|(c, _)| c.clone()).collect();
        let label_width = Self::label_area_width(&names);

        let mut chart = ChartBuilder::on(&root)
            .caption(&data.title, (FONT, CAPTION_SIZE))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(label_width)
            .build_cartesian_2d(0.0..x_max, (0..n).into_segmented())?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(n)
            .y_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => names.get(*i).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .x_desc(data.x_label.as_str())
            .y_desc(data.y_label.as_str())
            .label_style((FONT, LABEL_SIZE))
            .draw()?;

        let rows = data.bars.len();
        chart.draw_series(data.bars.iter().enumerate().map(|(rank, (_, value))| {
            let row = rows - 1 - rank;
            let mut bar = Rectangle::new(
                [
                    (0.0, SegmentValue::Exact(row)),
                    (*value, SegmentValue::Exact(row + 1)),
                ],
                data.color.filled(),
            );
            bar.set_margin(4, 4, 0, 0);
            bar
        }))?;

        root.present()?;
        Ok(())
    }

    fn draw_scatter(
        &self,
        data: &ScatterChartData,
        path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let x_max = Self::padded_max(data.points.iter().map(|p| p.health).fold(0.0, f64::max));
        let y_max = Self::padded_max(data.points.iter().map(|p| p.economic).fold(0.0, f64::max));

        let mut chart = ChartBuilder::on(&root)
            .caption(&data.title, (FONT, CAPTION_SIZE))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(0.0..x_max, 0.0..y_max)?;

        chart
            .configure_mesh()
            .x_desc(data.x_label.as_str())
            .y_desc(data.y_label.as_str())
            .label_style((FONT, LABEL_SIZE))
            .draw()?;

        chart.draw_series(data.points.iter().map(|p| {
            Circle::new((p.health, p.economic), POINT_RADIUS, POINT_COLOR.filled())
        }))?;

        chart.draw_series(data.points.iter().filter(|p| p.labeled).map(|p| {
            EmptyElement::at((p.health, p.economic))
                + Text::new(p.category.clone(), (6, -6), (FONT, 12).into_font())
        }))?;

        root.present()?;
        Ok(())
    }

    /// Leave a little headroom past the largest value; never a zero range.
    fn padded_max(max: f64) -> f64 {
        if max.is_finite() && max > 0.0 {
            max * 1.1
        } else {
            1.0
        }
    }

    fn label_area_width(names: &[String]) -> u32 {
        let longest = names.iter().map(|n| n.chars().count()).max().unwrap_or(0) as u32;
        (longest * 8 + 30).clamp(80, 320)
    }
}
