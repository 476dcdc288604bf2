//! Storm Impact - batch report generator
//!
//! Loads the storm table named in the config, prints the top-N tables and
//! writes the charts into the output directory.

mod bootstrap;

use anyhow::{Context, Result};
use std::path::Path;
use storm_impact::config::{ReportConfig, CONFIG_FILE};
use storm_impact::pipeline;

fn main() -> Result<()> {
    let config = ReportConfig::load_or_default(Path::new(CONFIG_FILE))?;
    bootstrap::setup_logging(&config.log_level)?;

    tracing::info!("Storm Impact v{} starting", env!("CARGO_PKG_VERSION"));

    let output = pipeline::run(&config)
        .with_context(|| format!("loading {}", config.input_path.display()))?;

    println!("{}", output.text());

    let written = pipeline::write_report(&output, &config)
        .with_context(|| format!("writing report to {}", config.output_dir.display()))?;

    tracing::info!(
        files = written.len(),
        "Report written to {}",
        config.output_dir.display()
    );

    Ok(())
}
