//! Cleaning, aggregation, and snapshot output for viewing-history recaps

pub mod aggregate;
pub mod clean;
pub mod personality;
pub mod title;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use aggregate::{AggregateConfig, RecapAggregator};
pub use clean::{clean, CleanConfig};
pub use personality::{classify, PersonalityInput};
pub use title::{is_promotional, parse_title};
pub use types::*;
pub use writer::write_stats;
