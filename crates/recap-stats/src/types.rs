//! Recap data structures and output record types

use chrono::{Duration, NaiveDateTime};
use serde::{Serialize, Serializer};

/// Calendar month names in histogram order
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Weekday names in histogram order (Monday first)
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Named time-of-day buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Buckets in histogram order
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];

    /// Bucket a playback start hour: 6-11 morning, 12-17 afternoon,
    /// 18-21 evening, 22-5 night
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => TimeOfDay::Morning,
            12..=17 => TimeOfDay::Afternoon,
            18..=21 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
        }
    }

    /// Position in the histogram array
    pub fn index(&self) -> usize {
        match self {
            TimeOfDay::Morning => 0,
            TimeOfDay::Afternoon => 1,
            TimeOfDay::Evening => 2,
            TimeOfDay::Night => 3,
        }
    }
}

/// Show name and episode structure parsed from a raw export title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleInfo {
    /// Normalized show or movie name
    pub show: String,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub is_episode: bool,
}

/// A viewing record that passed all cleaning filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedRecord {
    pub title: TitleInfo,
    pub start_time: NaiveDateTime,
    pub duration: Duration,
    pub device: Option<String>,
}

/// Per-show running totals built by the aggregation fold
#[derive(Debug, Clone)]
pub struct ShowAggregate {
    pub name: String,
    pub plays: u32,
    pub total_duration: Duration,
    pub watch_times: Vec<NaiveDateTime>,
}

impl ShowAggregate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plays: 0,
            total_duration: Duration::zero(),
            watch_times: Vec::new(),
        }
    }
}

/// One entry in the ranked top-shows list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopShow {
    pub name: String,
    pub plays: u32,
    pub hours: f64,
}

/// Viewer personality classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Personality {
    pub label: String,
    pub description: String,
}

/// Largest same-show single-day episode run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BiggestBinge {
    pub show: String,
    pub episodes: u32,
}

/// One tile in the fun-facts grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunFact {
    pub icon: String,
    pub stat: String,
    pub label: String,
}

/// The output record: everything the presentation layer consumes,
/// serialized once per run
#[derive(Debug, Clone, Serialize)]
pub struct RecapStats {
    pub total_hours: f64,
    pub total_titles: u32,
    pub unique_shows: u32,
    pub top_shows: Vec<TopShow>,
    #[serde(serialize_with = "ser_monthly")]
    pub monthly: [u32; 12],
    #[serde(serialize_with = "ser_time_of_day")]
    pub time_of_day: [u32; 4],
    pub longest_streak_days: u32,
    pub personality: Personality,
    pub year: i32,
    #[serde(serialize_with = "ser_day_of_week")]
    pub day_of_week: [u32; 7],
    pub active_days: u32,
    pub movies_watched: u32,
    pub episodes_watched: u32,
    pub binge_sessions: u32,
    pub biggest_binge: Option<BiggestBinge>,
    pub longest_session_titles: u32,
    pub peak_month: String,
    pub favorite_day: String,
    pub peak_time: String,
    pub top_device: String,
    pub first_watch_date: String,
    pub last_watch_date: String,
    pub fun_facts: Vec<FunFact>,
}

fn named_counts<S>(names: &[&str], counts: &[u32], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(names.iter().copied().zip(counts.iter().copied()))
}

fn ser_monthly<S: Serializer>(counts: &[u32; 12], serializer: S) -> Result<S::Ok, S::Error> {
    named_counts(&MONTH_NAMES, counts, serializer)
}

fn ser_day_of_week<S: Serializer>(counts: &[u32; 7], serializer: S) -> Result<S::Ok, S::Error> {
    named_counts(&WEEKDAY_NAMES, counts, serializer)
}

fn ser_time_of_day<S: Serializer>(counts: &[u32; 4], serializer: S) -> Result<S::Ok, S::Error> {
    let labels: Vec<&str> = TimeOfDay::ALL.iter().map(|t| t.label()).collect();
    named_counts(&labels, counts, serializer)
}
