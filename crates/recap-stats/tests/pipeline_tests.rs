//! End-to-end pipeline tests: raw records through cleaning, aggregation,
//! and snapshot output.

use chrono::{Duration, NaiveDateTime};
use recap_common::{RecapError, ViewingRecord, Year};
use recap_stats::{clean, write_stats, AggregateConfig, CleanConfig, RecapAggregator};
use tempfile::TempDir;

fn record(title: &str, start: &str, minutes: i64) -> ViewingRecord {
    ViewingRecord {
        profile: "Ana".to_string(),
        title: title.to_string(),
        start_time: NaiveDateTime::parse_from_str(start, "%Y-%m-%d %H:%M:%S").unwrap(),
        duration: Duration::minutes(minutes),
        supplemental_type: None,
        device: Some("Smart TV".to_string()),
    }
}

#[test]
fn short_views_are_excluded_from_every_statistic() {
    // Two real views of Show A in March, one 5-minute preview of Show B
    // below a 10-minute threshold
    let records = vec![
        record("Show A: Season 1: One (Episode 1)", "2025-03-14 20:00:00", 60),
        record("Show A: Season 1: Two (Episode 2)", "2025-03-15 20:00:00", 45),
        record("Show B", "2025-03-16 20:00:00", 5),
    ];

    let config = CleanConfig::new(Year(2025)).with_min_duration(Duration::minutes(10));
    let cleaned = clean(records, &config);
    let stats = RecapAggregator::default()
        .aggregate(cleaned, Year(2025))
        .unwrap();

    assert_eq!(stats.total_titles, 2);
    assert_eq!(stats.unique_shows, 1);
    assert_eq!(stats.top_shows.len(), 1);
    assert_eq!(stats.top_shows[0].name, "Show A");
    assert_eq!(stats.top_shows[0].plays, 2);
    assert_eq!(stats.top_shows[0].hours, 1.75);
    assert!(!stats
        .top_shows
        .iter()
        .any(|show| show.name.contains("Show B")));
}

#[test]
fn records_outside_the_target_year_never_contribute() {
    let records = vec![
        record("Show A: Season 1: One (Episode 1)", "2024-12-31 23:00:00", 60),
        record("Show A: Season 1: Two (Episode 2)", "2026-01-01 00:30:00", 60),
    ];

    let cleaned = clean(records, &CleanConfig::new(Year(2025)));
    let err = RecapAggregator::default()
        .aggregate(cleaned, Year(2025))
        .unwrap_err();

    assert!(matches!(err, RecapError::EmptyResult { year: 2025 }));
}

#[test]
fn empty_result_writes_no_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("recap_stats.json");

    let cleaned = clean(Vec::new(), &CleanConfig::new(Year(2025)));
    let result = RecapAggregator::default().aggregate(cleaned, Year(2025));
    if let Ok(stats) = result {
        write_stats(&stats, &output).unwrap();
    }

    assert!(!output.exists());
}

#[test]
fn streak_spans_consecutive_days_only() {
    // Two consecutive days, a five-day gap, then one more view
    let records = vec![
        record("Show A: Season 1: One (Episode 1)", "2025-04-01 20:00:00", 45),
        record("Show A: Season 1: Two (Episode 2)", "2025-04-02 20:00:00", 45),
        record("Show A: Season 1: Three (Episode 3)", "2025-04-07 20:00:00", 45),
    ];

    let cleaned = clean(records, &CleanConfig::new(Year(2025)));
    let stats = RecapAggregator::default()
        .aggregate(cleaned, Year(2025))
        .unwrap();

    assert_eq!(stats.longest_streak_days, 2);
}

#[test]
fn rerun_with_identical_input_is_byte_identical() {
    let records = vec![
        record("Show A: Season 1: One (Episode 1)", "2025-03-14 20:00:00", 60),
        record("Movie Night", "2025-06-20 22:30:00", 110),
        record("Show B: Season 2: Five (Episode 5)", "2025-08-02 08:15:00", 50),
    ];

    let dir = TempDir::new().unwrap();
    let first_path = dir.path().join("first.json");
    let second_path = dir.path().join("second.json");

    for path in [&first_path, &second_path] {
        let cleaned = clean(records.clone(), &CleanConfig::new(Year(2025)));
        let stats = RecapAggregator::default()
            .aggregate(cleaned, Year(2025))
            .unwrap();
        write_stats(&stats, path).unwrap();
    }

    assert_eq!(
        std::fs::read(&first_path).unwrap(),
        std::fs::read(&second_path).unwrap()
    );
}

#[test]
fn snapshot_histograms_sum_to_total_titles() {
    let records = vec![
        record("Show A: Season 1: One (Episode 1)", "2025-01-05 07:00:00", 45),
        record("Show A: Season 1: Two (Episode 2)", "2025-02-10 13:00:00", 45),
        record("Show B: Season 3: Nine (Episode 9)", "2025-02-11 19:00:00", 45),
        record("Late Film", "2025-11-30 23:45:00", 100),
    ];

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("recap_stats.json");

    let cleaned = clean(records, &CleanConfig::new(Year(2025)));
    let stats = RecapAggregator::default()
        .aggregate(cleaned, Year(2025))
        .unwrap();
    write_stats(&stats, &output).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();

    let monthly_sum: u64 = value["monthly"]
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_u64().unwrap())
        .sum();
    assert_eq!(monthly_sum, 4);
    assert_eq!(value["monthly"].as_object().unwrap().len(), 12);

    let tod_sum: u64 = value["time_of_day"]
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_u64().unwrap())
        .sum();
    assert_eq!(tod_sum, 4);
    assert_eq!(value["time_of_day"].as_object().unwrap().len(), 4);

    assert_eq!(value["total_titles"], 4);
    assert_eq!(value["personality"]["label"], "The Casual Viewer");
}

#[test]
fn custom_session_gap_changes_chaining() {
    let records = vec![
        record("Show A: Season 1: One (Episode 1)", "2025-03-14 20:00:00", 45),
        // 20 minutes after the previous record ends
        record("Show A: Season 1: Two (Episode 2)", "2025-03-14 21:05:00", 45),
    ];

    let cleaned = clean(records, &CleanConfig::new(Year(2025)));

    let default_stats = RecapAggregator::default()
        .aggregate(cleaned.clone(), Year(2025))
        .unwrap();
    assert_eq!(default_stats.longest_session_titles, 2);

    let strict = AggregateConfig {
        session_gap: Duration::minutes(10),
        ..AggregateConfig::default()
    };
    let strict_stats = RecapAggregator::new(strict)
        .aggregate(cleaned, Year(2025))
        .unwrap();
    assert_eq!(strict_stats.longest_session_titles, 1);
}
