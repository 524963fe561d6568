//! Snapshot serialization to durable storage

use crate::types::RecapStats;
use recap_common::{RecapError, Result};
use std::path::Path;
use tracing::{info, instrument};

/// Serialize the stats record as pretty-printed JSON, replacing any prior
/// snapshot at the destination
#[instrument(skip(stats))]
pub fn write_stats(stats: &RecapStats, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(stats)?;
    std::fs::write(path, json)
        .map_err(|err| RecapError::write_with_source(path.display().to_string(), err))?;

    info!(path = %path.display(), "wrote recap snapshot");
    Ok(())
}
