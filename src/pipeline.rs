//! The report pipeline:
//! load -> normalize/filter -> decode damage -> aggregate -> rank -> render.
//!
//! `analyze` is pure; `run` adds reading the input file and `write_report`
//! owns every output side effect.

use crate::charts::{ChartError, ChartPlotter, StaticChartRenderer};
use crate::config::ReportConfig;
use crate::data::{decode_records, DataLoader, DataProcessor, EventRecord, LoaderError};
use crate::report::{build_rankings, format_report, Rankings, Summary};
use crate::stats::{CategoryAggregate, StatsCalculator};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const REPORT_FILE: &str = "report.txt";
pub const SUMMARY_FILE: &str = "summary.json";
pub const HEALTH_CHART_FILE: &str = "health_ranking.png";
pub const ECONOMIC_CHART_FILE: &str = "economic_ranking.png";
pub const SCATTER_CHART_FILE: &str = "health_vs_economic.png";

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize summary: {0}")]
    Summary(#[from] serde_json::Error),
    #[error(transparent)]
    Chart(#[from] ChartError),
}

/// Everything computed by one run.
#[derive(Debug, Clone)]
pub struct ReportOutput {
    pub records_loaded: usize,
    pub health_records: usize,
    pub economic_records: usize,
    pub aggregates: BTreeMap<String, CategoryAggregate>,
    pub rankings: Rankings,
}

impl ReportOutput {
    pub fn text(&self) -> String {
        format_report(&self.rankings, self.records_loaded, self.health_records)
    }
}

/// Load the input file and run the analysis.
pub fn run(config: &ReportConfig) -> Result<ReportOutput, LoaderError> {
    tracing::info!("Loading {}", config.input_path.display());
    let records = DataLoader::load_records(&config.input_path)?;
    Ok(analyze(&records, config))
}

/// Run the analysis stages over already loaded records.
pub fn analyze(records: &[EventRecord], config: &ReportConfig) -> ReportOutput {
    let cleaned = DataProcessor::clean(
        records,
        config.cutoff_date,
        config.excluded_categories.as_slice(),
    );
    tracing::info!(
        loaded = records.len(),
        kept = cleaned.len(),
        "Filtered to events after {}",
        config.cutoff_date
    );

    let decoded = decode_records(&cleaned);
    tracing::info!(
        eligible = decoded.len(),
        "Decoded damage for records with recognized unit suffixes"
    );

    let aggregates = StatsCalculator::aggregate_by_category(&cleaned, &decoded);
    tracing::info!(categories = aggregates.len(), "Aggregated by event type");

    let rankings = build_rankings(&aggregates, config.top_n, config.chart_top_n);

    ReportOutput {
        records_loaded: records.len(),
        health_records: cleaned.len(),
        economic_records: decoded.len(),
        aggregates,
        rankings,
    }
}

/// Write tables, summary JSON and the three charts into `config.output_dir`.
pub fn write_report(
    output: &ReportOutput,
    config: &ReportConfig,
) -> Result<Vec<PathBuf>, OutputError> {
    let dir = &config.output_dir;
    std::fs::create_dir_all(dir).map_err(|source| OutputError::Write {
        path: dir.clone(),
        source,
    })?;

    let mut written = Vec::new();

    let report_path = dir.join(REPORT_FILE);
    write_file(&report_path, output.text().as_bytes())?;
    written.push(report_path);

    let summary = Summary {
        records_loaded: output.records_loaded,
        health_records: output.health_records,
        economic_records: output.economic_records,
        rankings: &output.rankings,
        categories: output.aggregates.values().collect(),
    };
    let summary_path = dir.join(SUMMARY_FILE);
    let summary_json = serde_json::to_string_pretty(&summary)?;
    write_file(&summary_path, summary_json.as_bytes())?;
    written.push(summary_path);

    let renderer = StaticChartRenderer::new(config.chart_width, config.chart_height);

    let health_path = dir.join(HEALTH_CHART_FILE);
    renderer.render_bar_chart(
        &ChartPlotter::health_bars(&output.rankings.health),
        &health_path,
    )?;
    written.push(health_path);

    let economic_path = dir.join(ECONOMIC_CHART_FILE);
    renderer.render_bar_chart(
        &ChartPlotter::economic_bars(&output.rankings.economic),
        &economic_path,
    )?;
    written.push(economic_path);

    let scatter = ChartPlotter::health_vs_economic(
        &output.aggregates,
        config.health_label_threshold,
        config.economic_label_threshold,
    );
    let scatter_path = dir.join(SCATTER_CHART_FILE);
    renderer.render_scatter(&scatter, &scatter_path)?;
    written.push(scatter_path);

    for path in &written {
        tracing::debug!("wrote {}", path.display());
    }

    Ok(written)
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), OutputError> {
    std::fs::write(path, contents).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}
