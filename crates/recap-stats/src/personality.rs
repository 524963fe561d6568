//! Viewer personality classification
//!
//! A priority-ordered decision table: rules are evaluated top to bottom and
//! the first match wins, so the classification stays auditable and testable
//! in isolation.

use crate::types::Personality;

/// Aggregate metrics the decision table is evaluated against
#[derive(Debug, Clone, Default)]
pub struct PersonalityInput {
    pub unique_shows: u32,
    pub longest_streak: u32,
    pub binge_sessions: u32,
    /// Share of plays in the Night bucket
    pub night_ratio: f64,
    /// Share of plays on Saturday and Sunday
    pub weekend_ratio: f64,
    pub movies: u32,
    pub episodes: u32,
    pub active_days: u32,
}

struct PersonalityRule {
    label: &'static str,
    description: &'static str,
    applies: fn(&PersonalityInput) -> bool,
}

const RULES: &[PersonalityRule] = &[
    PersonalityRule {
        label: "The Plot Twist Addict",
        description: "New show? Sign me up. Your watchlist is basically a buffet.",
        applies: |input| input.unique_shows > 100,
    },
    PersonalityRule {
        label: "The Marathon Runner",
        description: "Consistency is your middle name. Rain or shine, you show up for your shows.",
        applies: |input| input.longest_streak > 20 && input.binge_sessions > 40,
    },
    PersonalityRule {
        label: "The After Hours Explorer",
        description: "The world sleeps, you stream. Some stories just hit different at 2am.",
        applies: |input| input.night_ratio > 0.5,
    },
    PersonalityRule {
        label: "The Serial Chiller",
        description: "One episode is never enough. You don't watch shows, you experience them.",
        applies: |input| input.binge_sessions > 50,
    },
    PersonalityRule {
        label: "The Couch Critic",
        description: "Movies, series, documentaries - you appreciate it all. A true connoisseur.",
        applies: |input| input.movies > 150 && input.episodes > 400,
    },
    PersonalityRule {
        label: "The Weekend Wanderer",
        description: "Saturdays and Sundays are sacred. Your couch knows what's up.",
        applies: |input| input.weekend_ratio > 0.4,
    },
    PersonalityRule {
        label: "The Steady Streamer",
        description: "You've made streaming a lifestyle. Netflix is basically a roommate at this point.",
        applies: |input| input.active_days > 200,
    },
    PersonalityRule {
        label: "The Casual Viewer",
        description: "You watch on your own terms. No algorithm can define you.",
        applies: |_| true,
    },
];

/// Classify a viewer; the trailing catch-all rule guarantees a label
pub fn classify(input: &PersonalityInput) -> Personality {
    let rule = RULES
        .iter()
        .find(|rule| (rule.applies)(input))
        .expect("decision table ends with a catch-all rule");
    Personality {
        label: rule.label.to_string(),
        description: rule.description.to_string(),
    }
}
