use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::warn;

use crate::error::BeltError;
use crate::model::Team;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub default_season: i32,         // season shown when --season is absent
    pub data_dir: PathBuf,           // <season>.txt / <season>.txt.zst logs
    pub cache_dir: PathBuf,          // rendered <season>.html pages
    pub cache_lifetime_secs: u64,
    pub leader_path: PathBuf,        // {"name": ...} for the running season
    pub champions: BTreeMap<String, String>, // "season" -> prior league champion
}

impl Default for Config {
    fn default() -> Self {
        let champions = [
            (2008, "BOS"),
            (2009, "LAL"),
            (2010, "LAL"),
            (2011, "DAL"),
            (2012, "MIA"),
            (2013, "MIA"),
        ]
        .into_iter()
        .map(|(y, c)| (y.to_string(), c.to_string()))
        .collect();

        Self {
            default_season: 2013,
            data_dir: PathBuf::from("data"),
            cache_dir: PathBuf::from("tmp/cache"),
            cache_lifetime_secs: 3600,
            leader_path: PathBuf::from("public/leader.json"),
            champions,
        }
    }
}

impl Config {
    /// Read `config.toml` (or `$BELT_CONFIG`); defaults when absent or invalid.
    pub fn load() -> Self {
        let path = std::env::var("BELT_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(s) => Self::from_toml(&s).unwrap_or_else(|e| {
                warn!(path = %path, error = %e, "invalid config, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Champion of the season before `season`: the first belt holder.
    pub fn champion(&self, season: i32) -> Result<Team, BeltError> {
        self.champions
            .get(&season.to_string())
            .map(|code| Team::new(code.as_str()))
            .ok_or(BeltError::InvalidSeason(season))
    }

    /// Champion crowned at the end of `season`, when already known.
    pub fn next_champion(&self, season: i32) -> Option<Team> {
        self.champions.get(&(season + 1).to_string()).map(|code| Team::new(code.as_str()))
    }

    /// Configured seasons, ascending.
    pub fn seasons(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.champions.keys().filter_map(|k| k.parse().ok()).collect();
        years.sort_unstable();
        years
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_known_seasons() {
        let cfg = Config::default();
        assert_eq!(cfg.champion(2008).unwrap(), Team::new("BOS"));
        assert_eq!(cfg.champion(2013).unwrap(), Team::new("MIA"));
        assert_eq!(cfg.next_champion(2012), Some(Team::new("MIA")));
        assert_eq!(cfg.next_champion(2013), None);
        assert_eq!(cfg.seasons(), vec![2008, 2009, 2010, 2011, 2012, 2013]);
    }

    #[test]
    fn unknown_season_is_rejected() {
        let cfg = Config::default();
        assert_eq!(cfg.champion(1999), Err(BeltError::InvalidSeason(1999)));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = Config::from_toml(
            r#"
default_season = 2014
cache_lifetime_secs = 60

[champions]
2014 = "SAS"
"#,
        )
        .unwrap();
        assert_eq!(cfg.default_season, 2014);
        assert_eq!(cfg.cache_lifetime_secs, 60);
        assert_eq!(cfg.data_dir, PathBuf::from("data"));
        assert_eq!(cfg.champion(2014).unwrap(), Team::new("SAS"));
        assert!(cfg.champion(2013).is_err());
    }
}
