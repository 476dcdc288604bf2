//! Report configuration.
//!
//! Every field has a default; `storm_report.json` in the working directory
//! may override any subset of them.

use crate::data::processor::{default_cutoff, EXCLUDED_CATEGORIES};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "storm_report.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    /// Only events strictly after this date are ranked.
    pub cutoff_date: NaiveDate,
    pub excluded_categories: Vec<String>,
    /// Rows per table.
    pub top_n: usize,
    /// Bars per ranking chart.
    pub chart_top_n: usize,
    pub health_label_threshold: f64,
    pub economic_label_threshold: f64,
    pub chart_width: u32,
    pub chart_height: u32,
    pub log_level: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data/StormData.csv"),
            output_dir: PathBuf::from("output"),
            cutoff_date: default_cutoff(),
            excluded_categories: EXCLUDED_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            top_n: 5,
            chart_top_n: 10,
            health_label_threshold: 1.0,
            economic_label_threshold: 10.0,
            chart_width: 1024,
            chart_height: 640,
            log_level: "info".to_string(),
        }
    }
}

impl ReportConfig {
    /// Load from `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
