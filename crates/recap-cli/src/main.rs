//! Viewing History Recap - Main Entry Point

use anyhow::{Context, Result};
use chrono::Duration;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use recap_common::{init_logging, locate_export, load_records, LoggingConfig, Year};
use recap_config::ConfigLoader;
use recap_stats::{
    clean, write_stats, AggregateConfig, CleanConfig, RecapAggregator, RecapStats,
};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Turn a Netflix viewing-history export into recap statistics", long_about = None)]
struct Args {
    /// Directory searched for the viewing-history export
    data_root: Option<PathBuf>,

    /// Target calendar year
    #[arg(short, long)]
    year: Option<i32>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Output path for the stats snapshot
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level
    #[arg(short, long)]
    log_level: Option<String>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    // Load configuration, then let CLI flags override it
    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    if let Some(root) = &args.data_root {
        config.data.root = root.display().to_string();
    }
    if let Some(year) = args.year {
        config.report.year = year;
    }
    if let Some(output) = &args.output {
        config.data.output = Some(output.display().to_string());
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    config
        .validate_all()
        .context("invalid configuration after applying command-line overrides")?;

    init_logging(LoggingConfig {
        level: config.logging.level.clone(),
        file_path: config.logging.file.clone(),
        ..LoggingConfig::default()
    })
    .map_err(|err| anyhow::anyhow!(err))
    .context("failed to initialize logging")?;

    info!(year = config.report.year, "starting viewing-history recap");

    let year = Year(config.report.year);
    let root = PathBuf::from(&config.data.root);

    let export = locate_export(&root)?;
    info!(export = %export.display(), "found viewing history export");

    let data = load_records(&export)?;
    if data.skipped_rows > 0 {
        warn!(skipped = data.skipped_rows, "some rows were malformed");
    }

    let clean_config = CleanConfig::new(year)
        .with_min_duration(Duration::seconds(config.report.min_duration_secs as i64));
    let cleaned = clean(data.records, &clean_config);

    let aggregator = RecapAggregator::new(AggregateConfig {
        top_limit: config.report.top_shows,
        binge_threshold: config.report.binge_threshold,
        session_gap: Duration::minutes(config.report.session_gap_mins as i64),
    });
    let stats = aggregator.aggregate(cleaned, year)?;

    let output = config
        .data
        .output
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(|| root.join("recap_stats.json"));
    write_stats(&stats, &output)?;

    print_summary(&stats, data.skipped_rows, &output);
    Ok(())
}

fn print_summary(stats: &RecapStats, skipped_rows: usize, output: &Path) {
    println!("Stats saved to {}", output.display());
    println!();
    println!("Quick Summary:");
    println!("  Total Watch Time: {} hours", stats.total_hours);
    println!("  Titles Watched: {}", stats.total_titles);
    println!("  Unique Shows: {}", stats.unique_shows);
    if let Some(top) = stats.top_shows.first() {
        println!("  #1 Show: {} ({} plays)", top.name, top.plays);
    }
    println!("  Longest Streak: {} days", stats.longest_streak_days);
    println!("  Personality: {}", stats.personality.label);
    if skipped_rows > 0 {
        println!("  ({skipped_rows} rows skipped)");
    }
}
