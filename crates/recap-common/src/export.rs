//! Viewing-history export discovery and CSV parsing
//!
//! Netflix personal-data archives nest the viewing history under an
//! account-id folder (e.g. `<account>/CONTENT_INTERACTION/ViewingActivity.csv`),
//! so discovery walks the whole data root instead of probing a fixed path.

use crate::error::{RecapError, Result};
use chrono::{Duration, NaiveDateTime};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};
use walkdir::WalkDir;

/// File name of the viewing history inside the export archive
pub const EXPORT_FILE_NAME: &str = "ViewingActivity.csv";

/// Timestamp formats observed in real exports, tried in order
const START_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%d/%m/%Y %H:%M:%S"];

/// One raw row from the viewing-history export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewingRecord {
    /// Profile that watched the title
    pub profile: String,
    /// Raw title, may encode "Show: Season X: Episode Title"
    pub title: String,
    /// Playback start, local to the export
    pub start_time: NaiveDateTime,
    /// Elapsed playback time
    pub duration: Duration,
    /// Non-empty for trailers, hooks, and other promotional content
    pub supplemental_type: Option<String>,
    /// Device the title was played on
    pub device: Option<String>,
}

/// Parsed export contents plus the count of rows skipped as malformed
#[derive(Debug, Clone)]
pub struct ExportData {
    pub records: Vec<ViewingRecord>,
    pub skipped_rows: usize,
}

/// Locate the viewing-history CSV under a data root.
///
/// When several candidates exist (multi-profile archives extracted side by
/// side), the lexicographically first path wins so reruns stay deterministic.
#[instrument]
pub fn locate_export(root: &Path) -> Result<PathBuf> {
    let mut candidates: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("skipping unreadable directory entry: {err}");
                None
            }
        })
        .filter(|entry| {
            entry.file_type().is_file() && entry.file_name() == EXPORT_FILE_NAME
        })
        .map(|entry| entry.into_path())
        .collect();

    candidates.sort();

    match candidates.len() {
        0 => Err(RecapError::not_found(root.display().to_string())),
        1 => Ok(candidates.remove(0)),
        n => {
            warn!(
                candidates = n,
                chosen = %candidates[0].display(),
                "multiple export files found, using first lexicographic match"
            );
            Ok(candidates.remove(0))
        }
    }
}

/// Load and parse all rows from an export file.
///
/// A structurally unreadable file (missing header columns, unreadable bytes)
/// is fatal; individual malformed rows are skipped with a warning and counted.
#[instrument]
pub fn load_records(path: &Path) -> Result<ExportData> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        RecapError::parse_with_source(
            format!("unreadable export file: {}", path.display()),
            err,
        )
    })?;

    let mut rows = parse_csv(&content).into_iter();
    let header = rows
        .next()
        .ok_or_else(|| RecapError::parse("export file is empty"))?;
    let columns = ColumnIndex::resolve(&header)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (offset, row) in rows.enumerate() {
        if row.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        match columns.parse_row(&row) {
            Some(record) => records.push(record),
            None => {
                // +2: one for the header, one for one-based numbering
                warn!(row = offset + 2, "skipping malformed row");
                skipped += 1;
            }
        }
    }

    info!(
        records = records.len(),
        skipped, "loaded viewing history export"
    );
    Ok(ExportData {
        records,
        skipped_rows: skipped,
    })
}

/// Column positions resolved from the export header
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    profile: usize,
    start_time: usize,
    duration: usize,
    title: usize,
    supplemental_type: Option<usize>,
    device: Option<usize>,
}

impl ColumnIndex {
    fn resolve(header: &[String]) -> Result<Self> {
        let find = |name: &str| header.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name)
                .ok_or_else(|| RecapError::parse(format!("missing required column: {name}")))
        };

        Ok(Self {
            profile: require("Profile Name")?,
            start_time: require("Start Time")?,
            duration: require("Duration")?,
            title: require("Title")?,
            supplemental_type: find("Supplemental Video Type"),
            device: find("Device Type"),
        })
    }

    fn parse_row(&self, row: &[String]) -> Option<ViewingRecord> {
        let field = |idx: usize| row.get(idx).map(|f| f.trim());
        let optional = |idx: Option<usize>| {
            idx.and_then(|idx| field(idx))
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let title = field(self.title)?.to_string();
        if title.is_empty() {
            return None;
        }
        let start_time = parse_start_time(field(self.start_time)?)?;
        let duration = parse_duration(field(self.duration)?)?;

        Some(ViewingRecord {
            profile: field(self.profile).unwrap_or_default().to_string(),
            title,
            start_time,
            duration,
            supplemental_type: optional(self.supplemental_type),
            device: optional(self.device),
        })
    }
}

/// Parse a `HH:MM:SS` or `MM:SS` elapsed-time string
pub fn parse_duration(value: &str) -> Option<Duration> {
    let parts: Vec<&str> = value.split(':').collect();
    let seconds = match parts.as_slice() {
        [h, m, s] => {
            h.parse::<i64>().ok()? * 3600 + m.parse::<i64>().ok()? * 60 + s.parse::<i64>().ok()?
        }
        [m, s] => m.parse::<i64>().ok()? * 60 + s.parse::<i64>().ok()?,
        _ => return None,
    };
    if seconds < 0 {
        return None;
    }
    Some(Duration::seconds(seconds))
}

/// Parse a playback start timestamp, trying known export formats in order
pub fn parse_start_time(value: &str) -> Option<NaiveDateTime> {
    START_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Split CSV text into rows of fields, honoring quoted fields with embedded
/// commas, doubled quotes, and newlines
fn parse_csv(input: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        field.push('"');
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                '\r' => {}
                '\n' => {
                    fields.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut fields));
                }
                _ => field.push(c),
            }
        }
    }

    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        rows.push(fields);
    }
    rows
}
