use std::fmt;

use chrono::NaiveDate;

use crate::error::BeltError;

/// Team identity: a short franchise code ("BOS", "LAL"). Compared by value,
/// case-sensitively.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Team {
    code: String,
}

impl Team {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Logo path used by the report ("/img/teams/BOS.gif").
    pub fn logo_url(&self) -> String {
        format!("/img/teams/{}.gif", self.code)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// One played game. Construction rejects ties, blank codes and a team
/// playing itself, so `winner`/`loser` are always defined.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    home: Team,
    away: Team,
    home_score: u32,
    away_score: u32,
    date: NaiveDate,
}

impl Game {
    pub fn new(
        home: Team,
        away: Team,
        home_score: u32,
        away_score: u32,
        date: NaiveDate,
    ) -> Result<Self, BeltError> {
        if home.code().trim().is_empty() || away.code().trim().is_empty() {
            return Err(BeltError::MalformedGame(format!("missing team code on {}", date)));
        }
        if home == away {
            return Err(BeltError::MalformedGame(format!("{} plays itself on {}", home, date)));
        }
        if home_score == away_score {
            return Err(BeltError::MalformedGame(format!(
                "tied score {}-{} between {} and {} on {}",
                home_score, away_score, home, away, date
            )));
        }
        Ok(Self { home, away, home_score, away_score, date })
    }

    pub fn home(&self) -> &Team {
        &self.home
    }

    pub fn away(&self) -> &Team {
        &self.away
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn winner(&self) -> &Team {
        if self.home_score > self.away_score { &self.home } else { &self.away }
    }

    pub fn loser(&self) -> &Team {
        if self.home_score > self.away_score { &self.away } else { &self.home }
    }

    pub fn involves(&self, team: &Team) -> bool {
        self.home == *team || self.away == *team
    }

    /// "home-away", e.g. "98-95".
    pub fn score(&self) -> String {
        format!("{}-{}", self.home_score, self.away_score)
    }
}

/// Belt record of one team. `Default` is the zero value every team starts
/// from when first seen in the schedule.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TeamStats {
    pub games: u32,
    pub wins: u32,
    pub won_as_challenger: u32,
    pub won_as_defender: u32,
    pub losses: u32,
    pub lost_as_challenger: u32,
    pub lost_as_defender: u32,
    pub win_percent: f64,
}

impl TeamStats {
    /// Belt win recorded for this team. `defending` is true when the team
    /// held the belt going into the game.
    pub fn add_win(&mut self, defending: bool) {
        self.games += 1;
        self.wins += 1;
        if defending {
            self.won_as_defender += 1;
        } else {
            self.won_as_challenger += 1;
        }
        self.refresh_win_percent();
    }

    pub fn add_loss(&mut self, defending: bool) {
        self.games += 1;
        self.losses += 1;
        if defending {
            self.lost_as_defender += 1;
        } else {
            self.lost_as_challenger += 1;
        }
        self.refresh_win_percent();
    }

    fn refresh_win_percent(&mut self) {
        self.win_percent = win_percent(self.wins, self.games);
    }
}

/// wins / games * 100 rounded to two decimals (half away from zero), 0 for
/// a team without games.
pub fn win_percent(wins: u32, games: u32) -> f64 {
    if games == 0 {
        return 0.0;
    }
    (wins as f64 / games as f64 * 10_000.0).round() / 100.0
}
