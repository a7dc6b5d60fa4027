use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use anyhow::Context;
use tracing::debug;

/// Rendered pages on disk, one file per season.
pub struct PageCache {
    dir: PathBuf,
    lifetime: Duration,
}

impl PageCache {
    pub fn new(dir: impl Into<PathBuf>, lifetime_secs: u64) -> Self {
        Self { dir: dir.into(), lifetime: Duration::from_secs(lifetime_secs) }
    }

    pub fn path_for(&self, season: i32) -> PathBuf {
        self.dir.join(format!("{}.html", season))
    }

    /// Cached page for `season` if it was written less than the lifetime ago.
    pub fn fresh(&self, season: i32) -> Option<String> {
        self.fresh_at(season, SystemTime::now())
    }

    fn fresh_at(&self, season: i32, now: SystemTime) -> Option<String> {
        let path = self.path_for(season);
        let modified = fs::metadata(&path).and_then(|m| m.modified()).ok()?;
        let age = now.duration_since(modified).unwrap_or_default();
        if age >= self.lifetime {
            debug!(path = %path.display(), age_secs = age.as_secs(), "cache stale");
            return None;
        }
        let page = fs::read_to_string(&path).ok()?;
        debug!(path = %path.display(), age_secs = age.as_secs(), "cache hit");
        Some(page)
    }

    pub fn store(&self, season: i32, page: &str) -> anyhow::Result<()> {
        write_creating_dirs(&self.path_for(season), page)
    }
}

pub(crate) fn write_creating_dirs(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}
