use std::path::Path;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cache::write_creating_dirs;
use crate::model::Team;

/// Snapshot of who holds the belt in the running season.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Leader {
    pub name: String,
}

impl Leader {
    pub fn new(holder: &Team) -> Self {
        Self { name: holder.code().to_string() }
    }
}

/// Only the season matching the current calendar year has a live leader.
pub fn is_current_season(season: i32, current_year: i32) -> bool {
    season == current_year
}

/// Write `{"name": "<code>"}` when `season` is this year's. Returns whether a
/// snapshot was written.
pub fn publish(path: &Path, season: i32, holder: &Team) -> anyhow::Result<bool> {
    publish_for_year(path, season, Utc::now().year(), holder)
}

fn publish_for_year(
    path: &Path,
    season: i32,
    current_year: i32,
    holder: &Team,
) -> anyhow::Result<bool> {
    if !is_current_season(season, current_year) {
        return Ok(false);
    }
    let json = serde_json::to_string(&Leader::new(holder))?;
    write_creating_dirs(path, &json)?;
    info!(path = %path.display(), holder = %holder, "leader snapshot written");
    Ok(true)
}
