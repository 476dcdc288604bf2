//! CSV Data Loader Module
//! Handles storm table loading and row extraction using Polars.

use crate::data::EventRecord;
use chrono::NaiveDateTime;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const COL_CATEGORY: &str = "EVTYPE";
pub const COL_DATE: &str = "BGN_DATE";
pub const COL_FATALITIES: &str = "FATALITIES";
pub const COL_INJURIES: &str = "INJURIES";
pub const COL_PROP_AMOUNT: &str = "PROPDMG";
pub const COL_PROP_CODE: &str = "PROPDMGEXP";
pub const COL_CROP_AMOUNT: &str = "CROPDMG";
pub const COL_CROP_CODE: &str = "CROPDMGEXP";

/// Every column the report reads.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    COL_CATEGORY,
    COL_DATE,
    COL_FATALITIES,
    COL_INJURIES,
    COL_PROP_AMOUNT,
    COL_PROP_CODE,
    COL_CROP_AMOUNT,
    COL_CROP_CODE,
];

/// Begin dates look like `4/18/1950 0:00:00`.
pub const DATE_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Failed to read CSV records: {0}")]
    RecordError(#[from] csv::Error),
    #[error("Malformed row at line {line}: expected {expected} fields, found {found}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("No data loaded")]
    NoData,
}

/// Handles CSV file loading with Polars.
pub struct DataLoader {
    df: Option<DataFrame>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self { df: None }
    }

    /// Load a CSV file using Polars.
    ///
    /// Every column is read as text; typing happens in [`DataLoader::records`]
    /// so that a stray value in a numeric column only blanks that cell.
    /// A row with the wrong number of fields fails the whole load.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoaderError> {
        if !file_path.exists() {
            return Err(LoaderError::NotFound(file_path.to_path_buf()));
        }
        Self::check_row_widths(file_path)?;

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        Self::validate_columns(&df)?;
        if df.height() == 0 {
            return Err(LoaderError::NoData);
        }

        tracing::debug!(
            rows = df.height(),
            columns = df.width(),
            "loaded {}",
            file_path.display()
        );

        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Load a CSV file and convert it straight into event records.
    pub fn load_records(file_path: &Path) -> Result<Vec<EventRecord>, LoaderError> {
        let mut loader = Self::new();
        loader.load_csv(file_path)?;
        loader.records()
    }

    /// Check that every row has as many fields as the header.
    ///
    /// Polars pads short rows with nulls, which would turn a truncated line
    /// into a record with missing values instead of an error.
    pub fn check_row_widths(file_path: &Path) -> Result<(), LoaderError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(file_path)?;

        let expected = reader.headers()?.len();
        for result in reader.byte_records() {
            let record = result?;
            if record.len() != expected {
                return Err(LoaderError::MalformedRow {
                    line: record.position().map(|p| p.line()).unwrap_or(0),
                    expected,
                    found: record.len(),
                });
            }
        }

        Ok(())
    }

    /// Check that every required column is present.
    pub fn validate_columns(df: &DataFrame) -> Result<(), LoaderError> {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        match REQUIRED_COLUMNS
            .iter()
            .find(|required| !names.iter().any(|n| n.as_str() == **required))
        {
            Some(missing) => Err(LoaderError::MissingColumn(missing.to_string())),
            None => Ok(()),
        }
    }

    /// Convert the loaded DataFrame into typed event records.
    pub fn records(&self) -> Result<Vec<EventRecord>, LoaderError> {
        let df = self.df.as_ref().ok_or(LoaderError::NoData)?;

        let categories = Self::text_column(df, COL_CATEGORY)?;
        let dates = Self::text_column(df, COL_DATE)?;
        let fatalities = Self::number_column(df, COL_FATALITIES)?;
        let injuries = Self::number_column(df, COL_INJURIES)?;
        let prop_amounts = Self::number_column(df, COL_PROP_AMOUNT)?;
        let prop_codes = Self::text_column(df, COL_PROP_CODE)?;
        let crop_amounts = Self::number_column(df, COL_CROP_AMOUNT)?;
        let crop_codes = Self::text_column(df, COL_CROP_CODE)?;

        let records = (0..df.height())
            .map(|i| EventRecord {
                category: categories[i].clone().unwrap_or_default(),
                date: dates[i].as_deref().and_then(parse_date),
                fatalities: fatalities[i].and_then(to_count),
                injuries: injuries[i].and_then(to_count),
                prop_amount: prop_amounts[i],
                prop_code: prop_codes[i].clone().unwrap_or_default(),
                crop_amount: crop_amounts[i],
                crop_code: crop_codes[i].clone().unwrap_or_default(),
            })
            .collect();

        Ok(records)
    }

    fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, LoaderError> {
        let column = df
            .column(name)
            .map_err(|_| LoaderError::MissingColumn(name.to_string()))?;
        let as_text = column.cast(&DataType::String)?;
        let ca = as_text.as_materialized_series().str()?;

        Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
    }

    fn number_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, LoaderError> {
        let values = Self::text_column(df, name)?;

        Ok(values
            .into_iter()
            .map(|v| {
                v.and_then(|s| s.trim().parse::<f64>().ok())
                    .filter(|n| n.is_finite())
            })
            .collect())
    }
}

/// Parse a begin-date cell; `None` on anything unexpected.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Counts must be whole and non-negative; anything else is a bad cell.
fn to_count(value: f64) -> Option<u32> {
    if value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}
