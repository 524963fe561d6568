//! Row validation and filtering ahead of aggregation

use crate::title::{is_promotional, parse_title};
use crate::types::CleanedRecord;
use chrono::{Datelike, Duration};
use recap_common::{ViewingRecord, Year};
use tracing::{debug, instrument};

/// Filter parameters for a cleaning pass
#[derive(Debug, Clone)]
pub struct CleanConfig {
    /// Target calendar year
    pub year: Year,
    /// Views shorter than this are previews, not real views
    pub min_duration: Duration,
}

impl CleanConfig {
    pub fn new(year: Year) -> Self {
        Self {
            year,
            min_duration: Duration::seconds(60),
        }
    }

    pub fn with_min_duration(mut self, min_duration: Duration) -> Self {
        self.min_duration = min_duration;
        self
    }
}

/// Apply the cleaning filters in order: year, minimum duration, non-content
/// markers. The year filter runs first so records outside the target year
/// never contribute to any statistic.
#[instrument(skip(records))]
pub fn clean(records: Vec<ViewingRecord>, config: &CleanConfig) -> Vec<CleanedRecord> {
    let total = records.len();

    let in_year: Vec<ViewingRecord> = records
        .into_iter()
        .filter(|record| record.start_time.year() == config.year.0)
        .collect();
    let after_year = in_year.len();

    let long_enough: Vec<ViewingRecord> = in_year
        .into_iter()
        .filter(|record| record.duration >= config.min_duration)
        .collect();
    let after_duration = long_enough.len();

    let cleaned: Vec<CleanedRecord> = long_enough
        .into_iter()
        .filter(|record| record.supplemental_type.is_none() && !is_promotional(&record.title))
        .map(|record| CleanedRecord {
            title: parse_title(&record.title),
            start_time: record.start_time,
            duration: record.duration,
            device: record.device,
        })
        .collect();

    debug!(
        total,
        after_year,
        after_duration,
        cleaned = cleaned.len(),
        "applied cleaning filters"
    );
    cleaned
}
