//! Integration tests for export discovery and loading against a real
//! directory tree shaped like an extracted Netflix archive.

use chrono::Duration;
use recap_common::{load_records, locate_export, RecapError, EXPORT_FILE_NAME};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HEADER: &str =
    "Profile Name,Start Time,Duration,Attributes,Title,Supplemental Video Type,Device Type,Bookmark,Latest Bookmark,Country";

fn write_export(dir: &Path, rows: &[&str]) -> std::path::PathBuf {
    let nested = dir.join("account-123").join("CONTENT_INTERACTION");
    fs::create_dir_all(&nested).unwrap();
    let path = nested.join(EXPORT_FILE_NAME);
    let mut content = String::from(HEADER);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn locates_export_in_nested_archive() {
    let dir = TempDir::new().unwrap();
    let written = write_export(dir.path(), &[]);

    let found = locate_export(dir.path()).unwrap();
    assert_eq!(found, written);
}

#[test]
fn missing_export_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = locate_export(dir.path()).unwrap_err();
    assert!(matches!(err, RecapError::NotFound { .. }));
}

#[test]
fn ambiguous_exports_resolve_lexicographically() {
    let dir = TempDir::new().unwrap();

    let b = dir.path().join("b-profile");
    fs::create_dir_all(&b).unwrap();
    fs::write(b.join(EXPORT_FILE_NAME), HEADER).unwrap();

    let a = dir.path().join("a-profile");
    fs::create_dir_all(&a).unwrap();
    fs::write(a.join(EXPORT_FILE_NAME), HEADER).unwrap();

    let found = locate_export(dir.path()).unwrap();
    assert_eq!(found, a.join(EXPORT_FILE_NAME));
}

#[test]
fn loads_records_and_skips_malformed_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_export(
        dir.path(),
        &[
            "Ana,2025-03-14 21:30:12,00:45:00,,\"Dept. Q: Season 1: The Boy in the Box (Episode 1)\",,Smart TV,0,0,GB",
            "Ana,not-a-timestamp,00:45:00,,Broken Row,,Smart TV,0,0,GB",
            "Ana,2025-03-15 09:10:00,01:00:00,,KPop Demon Hunters,,iPhone 15,0,0,GB",
        ],
    );

    let data = load_records(&path).unwrap();
    assert_eq!(data.records.len(), 2);
    assert_eq!(data.skipped_rows, 1);

    let first = &data.records[0];
    assert_eq!(first.profile, "Ana");
    assert_eq!(
        first.title,
        "Dept. Q: Season 1: The Boy in the Box (Episode 1)"
    );
    assert_eq!(first.duration, Duration::minutes(45));
    assert_eq!(first.device.as_deref(), Some("Smart TV"));
    assert!(first.supplemental_type.is_none());
}

#[test]
fn header_without_required_column_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(EXPORT_FILE_NAME);
    fs::write(&path, "Profile Name,Title\nAna,Something\n").unwrap();

    let err = load_records(&path).unwrap_err();
    assert!(matches!(err, RecapError::Parse { .. }));
    assert!(err.to_string().contains("Start Time"));
}
