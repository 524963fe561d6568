//! Title parsing for the Netflix naming convention
//!
//! Episode rows look like `"Show Name: Season X: Episode Title (Episode Y)"`;
//! movies are plain names. Promotional rows (trailers, hooks, teasers) carry
//! recognizable suffixes and are filtered out entirely.

use crate::types::TitleInfo;
use regex::Regex;
use std::sync::LazyLock;

/// Matches `"Show: Season X ... (Episode Y)"` with an optional episode number
static SEASON_EPISODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?):\s*Season\s*(\d+).*?(?:\(Episode\s*(\d+)\))?$")
        .expect("invalid season/episode regex")
});

/// Promotional suffixes stripped from movie names
static PROMO_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"_hook.*|_primary.*|Clip \d+:|Teaser.*:").expect("invalid promo suffix regex")
});

/// Non-content markers; any match disqualifies the row
static PROMO_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)_hook|_primary|\btrailer\b|\bteaser\b|\bclip \d+\b")
        .expect("invalid promo marker regex")
});

/// Whether a title names promotional material rather than real content
pub fn is_promotional(title: &str) -> bool {
    PROMO_MARKER_RE.is_match(title)
}

/// Parse a raw export title into show name and episode structure
pub fn parse_title(title: &str) -> TitleInfo {
    let title = title.trim();

    if let Some(caps) = SEASON_EPISODE_RE.captures(title) {
        return TitleInfo {
            show: caps[1].trim().to_string(),
            season: caps[2].parse().ok(),
            episode: caps.get(3).and_then(|m| m.as_str().parse().ok()),
            is_episode: true,
        };
    }

    if !title.contains(": Season") && !title.contains(": Episode") {
        // Movie or standalone special; strip promotional suffixes
        let clean = PROMO_SUFFIX_RE.replace_all(title, "");
        return TitleInfo {
            show: clean.trim().to_string(),
            season: None,
            episode: None,
            is_episode: false,
        };
    }

    // Unrecognized episodic shape, fall back to the first segment
    TitleInfo {
        show: title.split(':').next().unwrap_or(title).trim().to_string(),
        season: None,
        episode: None,
        is_episode: false,
    }
}
