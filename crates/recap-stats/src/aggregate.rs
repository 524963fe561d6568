//! Single-pass aggregation of cleaned viewing records into recap statistics

use crate::personality::{classify, PersonalityInput};
use crate::types::{
    BiggestBinge, CleanedRecord, FunFact, RecapStats, ShowAggregate, TimeOfDay, TopShow,
    MONTH_NAMES, WEEKDAY_NAMES,
};
use chrono::{Datelike, Duration, NaiveDate, Timelike};
use recap_common::utils::{duration_hours, round1, round2};
use recap_common::{RecapError, Result, Year};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, info, instrument};

/// Configuration for aggregation operations
#[derive(Debug, Clone)]
pub struct AggregateConfig {
    /// Number of shows kept in the ranked top list
    pub top_limit: usize,
    /// Same-show episodes on one day needed to count as a binge session
    pub binge_threshold: u32,
    /// Gap below which consecutive records chain into one viewing session
    pub session_gap: Duration,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            top_limit: 10,
            binge_threshold: 4,
            session_gap: Duration::minutes(30),
        }
    }
}

/// Aggregator folding cleaned records into the output record
#[derive(Debug, Default)]
pub struct RecapAggregator {
    config: AggregateConfig,
}

impl RecapAggregator {
    pub fn new(config: AggregateConfig) -> Self {
        Self { config }
    }

    /// Run the aggregation fold. Fails with an empty-result error when no
    /// records survived cleaning; in that case no output may be written.
    #[instrument(skip(self, records))]
    pub fn aggregate(&self, mut records: Vec<CleanedRecord>, year: Year) -> Result<RecapStats> {
        if records.is_empty() {
            return Err(RecapError::empty_result(year.0));
        }

        // Session chaining needs chronological order; every other statistic
        // is order-insensitive
        records.sort_by_key(|record| record.start_time);

        let mut shows: HashMap<String, ShowAggregate> = HashMap::new();
        let mut monthly = [0u32; 12];
        let mut day_of_week = [0u32; 7];
        let mut time_of_day = [0u32; 4];
        let mut watch_dates: BTreeSet<NaiveDate> = BTreeSet::new();
        let mut device_counts: HashMap<String, u32> = HashMap::new();
        let mut daily_episodes: BTreeMap<(NaiveDate, String), u32> = BTreeMap::new();
        let mut movies = 0u32;
        let mut episodes = 0u32;
        let mut total_duration = Duration::zero();

        for record in &records {
            total_duration = total_duration + record.duration;

            let aggregate = shows
                .entry(record.title.show.clone())
                .or_insert_with(|| ShowAggregate::new(record.title.show.clone()));
            aggregate.plays += 1;
            aggregate.total_duration = aggregate.total_duration + record.duration;
            aggregate.watch_times.push(record.start_time);

            monthly[record.start_time.month0() as usize] += 1;
            day_of_week[record.start_time.weekday().num_days_from_monday() as usize] += 1;
            time_of_day[TimeOfDay::from_hour(record.start_time.hour()).index()] += 1;

            let date = record.start_time.date();
            watch_dates.insert(date);

            if let Some(device) = &record.device {
                *device_counts.entry(device.clone()).or_insert(0) += 1;
            }

            if record.title.is_episode {
                episodes += 1;
                *daily_episodes
                    .entry((date, record.title.show.clone()))
                    .or_insert(0) += 1;
            } else {
                movies += 1;
            }
        }

        let total_titles = records.len() as u32;
        let longest_streak_days = longest_streak(&watch_dates);
        let longest_session_titles = longest_session(&records, self.config.session_gap);

        let binge_sessions = daily_episodes
            .values()
            .filter(|&&count| count >= self.config.binge_threshold)
            .count() as u32;
        let biggest_binge = biggest_binge(&daily_episodes, self.config.binge_threshold);

        // Rank by play count, ties broken by watch time, then by name so
        // reruns produce identical output
        let mut aggregates: Vec<ShowAggregate> = shows.into_values().collect();
        aggregates.sort_by(|a, b| {
            b.plays
                .cmp(&a.plays)
                .then_with(|| b.total_duration.cmp(&a.total_duration))
                .then_with(|| a.name.cmp(&b.name))
        });

        let unique_shows = aggregates.len() as u32;
        let top_shows: Vec<TopShow> = aggregates
            .iter()
            .take(self.config.top_limit)
            .map(|aggregate| TopShow {
                name: aggregate.name.clone(),
                plays: aggregate.plays,
                hours: round2(duration_hours(&aggregate.total_duration)),
            })
            .collect();
        debug!(
            unique_shows,
            top = top_shows.len(),
            "ranked show aggregates"
        );

        let total_hours = round1(duration_hours(&total_duration));
        let night_ratio = time_of_day[TimeOfDay::Night.index()] as f64 / total_titles as f64;
        let weekend_ratio = (day_of_week[5] + day_of_week[6]) as f64 / total_titles as f64;
        let active_days = watch_dates.len() as u32;

        let personality = classify(&PersonalityInput {
            unique_shows,
            longest_streak: longest_streak_days,
            binge_sessions,
            night_ratio,
            weekend_ratio,
            movies,
            episodes,
            active_days,
        });

        // records is non-empty and sorted chronologically
        let first_watch_date = records[0].start_time.date();
        let last_watch_date = records[records.len() - 1].start_time.date();

        let stats = RecapStats {
            total_hours,
            total_titles,
            unique_shows,
            top_shows,
            monthly,
            time_of_day,
            longest_streak_days,
            personality,
            year: year.0,
            day_of_week,
            active_days,
            movies_watched: movies,
            episodes_watched: episodes,
            binge_sessions,
            biggest_binge,
            longest_session_titles,
            peak_month: peak_label(&monthly, &MONTH_NAMES),
            favorite_day: peak_label(&day_of_week, &WEEKDAY_NAMES),
            peak_time: peak_time_label(&time_of_day),
            top_device: top_device(&device_counts),
            first_watch_date: first_watch_date.format("%Y-%m-%d").to_string(),
            last_watch_date: last_watch_date.format("%Y-%m-%d").to_string(),
            fun_facts: fun_facts(total_hours, unique_shows, night_ratio, active_days),
        };

        info!(
            total_titles,
            unique_shows,
            total_hours,
            longest_streak_days,
            "aggregated viewing history"
        );
        Ok(stats)
    }
}

/// Longest run of consecutive calendar dates with at least one view
fn longest_streak(dates: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0u32;
    let mut current = 0u32;
    let mut previous: Option<NaiveDate> = None;

    for &date in dates {
        current = match previous {
            Some(prev) if prev.succ_opt() == Some(date) => current + 1,
            _ => 1,
        };
        longest = longest.max(current);
        previous = Some(date);
    }
    longest
}

/// Longest chain of records where each starts within `gap` of the prior
/// record's end
fn longest_session(records: &[CleanedRecord], gap: Duration) -> u32 {
    let mut longest = 0u32;
    let mut current = 0u32;
    let mut previous_end = None;

    for record in records {
        let continues = previous_end
            .map_or(false, |end| record.start_time - end <= gap);
        current = if continues { current + 1 } else { 1 };
        longest = longest.max(current);
        previous_end = Some(record.start_time + record.duration);
    }
    longest
}

/// Largest same-show single-day episode run, if it clears the binge threshold
fn biggest_binge(
    daily_episodes: &BTreeMap<(NaiveDate, String), u32>,
    threshold: u32,
) -> Option<BiggestBinge> {
    let mut best: Option<(&(NaiveDate, String), u32)> = None;
    for (key, &count) in daily_episodes {
        if best.map_or(true, |(_, current)| count > current) {
            best = Some((key, count));
        }
    }
    best.filter(|&(_, count)| count >= threshold)
        .map(|((_, show), count)| BiggestBinge {
            show: show.clone(),
            episodes: count,
        })
}

/// Name of the first bucket holding the maximum count
fn peak_label(counts: &[u32], names: &[&str]) -> String {
    let mut best = 0usize;
    for (index, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = index;
        }
    }
    names[best].to_string()
}

fn peak_time_label(counts: &[u32; 4]) -> String {
    let labels: Vec<&str> = TimeOfDay::ALL.iter().map(|t| t.label()).collect();
    peak_label(counts, &labels)
}

/// Most-used device with its raw export name simplified
fn top_device(device_counts: &HashMap<String, u32>) -> String {
    let mut devices: Vec<(&String, &u32)> = device_counts.iter().collect();
    devices.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    match devices.first() {
        Some((name, _)) => simplify_device(name),
        None => "Unknown".to_string(),
    }
}

fn simplify_device(raw: &str) -> String {
    if raw.contains("TV") {
        "Smart TV".to_string()
    } else if raw.contains("iPhone") {
        "iPhone".to_string()
    } else if raw.contains("Android") {
        "Android".to_string()
    } else {
        raw.to_string()
    }
}

/// Up to four highlight tiles for the presentation layer
fn fun_facts(total_hours: f64, unique_shows: u32, night_ratio: f64, active_days: u32) -> Vec<FunFact> {
    let mut facts = Vec::new();

    if total_hours > 0.0 {
        facts.push(FunFact {
            icon: "clock".to_string(),
            stat: format!("{}", total_hours.round() as i64),
            label: "hours of entertainment".to_string(),
        });
    }
    if unique_shows > 0 {
        facts.push(FunFact {
            icon: "grid".to_string(),
            stat: unique_shows.to_string(),
            label: "different shows explored".to_string(),
        });
    }
    let night_pct = (night_ratio * 100.0).round() as i64;
    if night_pct > 20 {
        facts.push(FunFact {
            icon: "moon".to_string(),
            stat: format!("{night_pct}%"),
            label: "late night sessions".to_string(),
        });
    }
    if active_days > 0 {
        facts.push(FunFact {
            icon: "calendar".to_string(),
            stat: active_days.to_string(),
            label: "days you tuned in".to_string(),
        });
    }

    facts.truncate(4);
    facts
}
