//! Charts module - Chart data and PNG rendering

mod plotter;
mod renderer;

pub use plotter::{
    BarChartData, ChartPlotter, ScatterChartData, ScatterPoint, ECONOMIC_COLOR, HEALTH_COLOR,
    POINT_COLOR,
};
pub use renderer::{ChartError, StaticChartRenderer};
