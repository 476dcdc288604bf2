//! Data Processor Module
//! Handles event-type cleaning and row filtering.

use crate::data::EventRecord;
use chrono::NaiveDate;

/// Known duplicate event-type spellings and the label they collapse into.
///
/// Keys are matched after lowercasing and trimming.
pub const CATEGORY_SYNONYMS: [(&str, &str); 8] = [
    ("heavy surf/high surf", "high surf"),
    ("hurricane/typhoon", "hurricane"),
    ("thunderstorm wind", "tstm wind"),
    ("marine thunderstorm wind", "marine tstm wind"),
    ("storm surge/tide", "storm surge"),
    ("wild/forest fire", "wildfire"),
    ("extreme cold/wind chill", "extreme cold"),
    ("rip currents", "rip current"),
];

/// Event types left out of the rankings.
pub const EXCLUDED_CATEGORIES: [&str; 2] = ["astronomical high tide", "landslide"];

/// Records on or before this date are dropped. Reporting of event types was
/// not standardized before 2004.
pub const DEFAULT_CUTOFF: (i32, u32, u32) = (2003, 12, 31);

pub fn default_cutoff() -> NaiveDate {
    let (y, m, d) = DEFAULT_CUTOFF;
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

/// Handles data cleaning operations. Every step returns a new record set.
pub struct DataProcessor;

impl DataProcessor {
    /// Lowercase, trim and collapse known synonyms into one canonical label.
    pub fn normalize_category(raw: &str) -> String {
        let cleaned = raw.trim().to_lowercase();

        CATEGORY_SYNONYMS
            .iter()
            .find(|(alias, _)| *alias == cleaned)
            .map(|(_, canonical)| canonical.to_string())
            .unwrap_or(cleaned)
    }

    /// Replace every record's label with its canonical form.
    pub fn normalize_categories(records: &[EventRecord]) -> Vec<EventRecord> {
        records
            .iter()
            .map(|r| EventRecord {
                category: Self::normalize_category(&r.category),
                ..r.clone()
            })
            .collect()
    }

    /// Keep records dated strictly after `cutoff`. Undated records are dropped.
    pub fn filter_by_date(records: &[EventRecord], cutoff: NaiveDate) -> Vec<EventRecord> {
        records
            .iter()
            .filter(|r| r.date.is_some_and(|d| d.date() > cutoff))
            .cloned()
            .collect()
    }

    /// Drop records whose (canonical) category is in `blocked`.
    pub fn exclude_categories<S: AsRef<str>>(
        records: &[EventRecord],
        blocked: &[S],
    ) -> Vec<EventRecord> {
        records
            .iter()
            .filter(|r| !blocked.iter().any(|b| b.as_ref() == r.category))
            .cloned()
            .collect()
    }

    /// Normalize, then filter by date, then drop excluded categories.
    ///
    /// Exclusion matches canonical labels, so normalization has to run first.
    pub fn clean<S: AsRef<str>>(
        records: &[EventRecord],
        cutoff: NaiveDate,
        blocked: &[S],
    ) -> Vec<EventRecord> {
        let normalized = Self::normalize_categories(records);
        let dated = Self::filter_by_date(&normalized, cutoff);
        let kept = Self::exclude_categories(&dated, blocked);

        tracing::debug!(
            input = records.len(),
            after_date = dated.len(),
            after_exclusion = kept.len(),
            "cleaned event records"
        );

        kept
    }
}
