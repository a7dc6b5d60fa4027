use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Instant;

use anyhow::Context;
use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use crate::error::BeltError;
use crate::model::{Game, Team};
use crate::teams;

// Dates may carry commas ("Tue, Oct 30, 2012"), so the date column is matched
// before the rest of the row is split.
fn row_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"^\s*"?(?P<date>(?:[A-Z][a-z]{2},? )?[A-Z][a-z]{2} \d{1,2},? \d{4}|\d{4}-\d{2}-\d{2})"?\s*,(?P<rest>.*)$"#,
        )
        .expect("row regex is valid")
    })
}

/// Parse "Tue, Oct 30, 2012", "Tue Oct 30 2012", "Oct 30 2012" or "2012-10-30".
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    let cleaned = s.replace(',', " ");
    let parts: Vec<&str> = cleaned.split_whitespace().collect();
    if parts.len() < 3 {
        return None;
    }
    let tail = parts[parts.len() - 3..].join(" ");
    NaiveDate::parse_from_str(&tail, "%b %d %Y").ok()
}

fn clean_field(f: &str) -> &str {
    f.trim().trim_matches('"').trim()
}

/// Parse one schedule row. `Ok(None)` for headers, blank lines and games
/// without a final score.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Game>, BeltError> {
    let malformed = |reason: String| BeltError::MalformedLine { line: line_no, reason };

    let caps = match row_re().captures(line) {
        Some(c) => c,
        None => return Ok(None),
    };
    let date = parse_date(&caps["date"])
        .ok_or_else(|| malformed(format!("bad date {:?}", &caps["date"])))?;

    let fields: Vec<&str> = caps["rest"].split(',').map(clean_field).collect();

    // (team, points) pairs: visitor first, then home
    let mut pairs: Vec<(&str, u32)> = Vec::with_capacity(2);
    let mut i = 0;
    while i + 1 < fields.len() && pairs.len() < 2 {
        let (name, next) = (fields[i], fields[i + 1]);
        let pts = next.parse::<u32>().ok();
        match (teams::code_for(name), pts) {
            (Some(code), Some(p)) => {
                pairs.push((code, p));
                i += 2;
            }
            (None, Some(_)) if !name.is_empty() && name.parse::<u32>().is_err() => {
                return Err(malformed(format!("unknown team {:?}", name)));
            }
            _ => i += 1,
        }
    }

    if pairs.len() < 2 {
        // scheduled but not played yet
        return Ok(None);
    }
    let (away, away_pts) = pairs[0];
    let (home, home_pts) = pairs[1];

    Game::new(Team::new(home), Team::new(away), home_pts, away_pts, date)
        .map(Some)
        .map_err(|e| match e {
            BeltError::MalformedGame(reason) => malformed(reason),
            other => other,
        })
}

/// Parse a whole schedule export. The first malformed row aborts the parse.
pub fn games_from_reader<R: BufRead>(reader: R) -> anyhow::Result<Vec<Game>> {
    let mut games = Vec::new();
    let mut skipped = 0usize;
    for (idx, line_res) in reader.lines().enumerate() {
        let line = line_res?;
        match parse_line(&line, idx + 1)? {
            Some(g) => games.push(g),
            None => skipped += 1,
        }
    }
    debug!(games = games.len(), skipped, "schedule parsed");
    Ok(games)
}

/// Location of a season's log: `<season>.txt`, else `<season>.txt.zst`.
pub fn season_path(data_dir: &Path, season: i32) -> Option<PathBuf> {
    let plain = data_dir.join(format!("{}.txt", season));
    if plain.is_file() {
        return Some(plain);
    }
    let packed = data_dir.join(format!("{}.txt.zst", season));
    if packed.is_file() {
        return Some(packed);
    }
    None
}

/// Load every played game of a season from `data_dir`.
pub fn load_season(data_dir: &Path, season: i32) -> anyhow::Result<Vec<Game>> {
    let path = season_path(data_dir, season).with_context(|| {
        format!("no game log for season {} in {}", season, data_dir.display())
    })?;

    let t0 = Instant::now();
    let file = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
    let games = if path.extension().and_then(|e| e.to_str()) == Some("zst") {
        let decoder = zstd::stream::Decoder::new(file)?;
        games_from_reader(BufReader::new(decoder))
    } else {
        games_from_reader(BufReader::new(file))
    }
    .with_context(|| format!("parsing {}", path.display()))?;

    debug!(
        path = %path.display(),
        games = games.len(),
        secs = t0.elapsed().as_secs_f64(),
        "season loaded"
    );
    Ok(games)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_date_formats() {
        let d = NaiveDate::from_ymd_opt(2012, 10, 30).unwrap();
        assert_eq!(parse_date("Tue, Oct 30, 2012"), Some(d));
        assert_eq!(parse_date("Tue Oct 30 2012"), Some(d));
        assert_eq!(parse_date("2012-10-30"), Some(d));
        assert_eq!(parse_date("Date"), None);
    }

    #[test]
    fn parses_scored_row_visitor_first() {
        let line = "Tue, Oct 30, 2012,7:00 pm,Washington Wizards,84,Cleveland Cavaliers,94,Box Score,,20562,Quicken Loans Arena,";
        let g = parse_line(line, 2).unwrap().unwrap();
        assert_eq!(g.away().code(), "WAS");
        assert_eq!(g.home().code(), "CLE");
        assert_eq!(g.score(), "94-84");
        assert_eq!(g.winner().code(), "CLE");
        assert_eq!(g.date(), NaiveDate::from_ymd_opt(2012, 10, 30).unwrap());
    }

    #[test]
    fn parses_rows_without_start_time() {
        let line = "Wed Oct 31 2012,Box Score,Boston Celtics,99,Milwaukee Bucks,88,OT,18717";
        let g = parse_line(line, 3).unwrap().unwrap();
        assert_eq!(g.away().code(), "BOS");
        assert_eq!(g.home().code(), "MIL");
        assert_eq!(g.score(), "88-99");
    }

    #[test]
    fn accepts_codes_and_iso_dates() {
        let g = parse_line("2013-01-05,LAL,100,BOS,90", 1).unwrap().unwrap();
        assert_eq!(g.away().code(), "LAL");
        assert_eq!(g.home().code(), "BOS");
    }

    #[test]
    fn skips_headers_and_unplayed_games() {
        assert_eq!(parse_line("Date,Start (ET),Visitor/Neutral,PTS,Home/Neutral,PTS", 1), Ok(None));
        assert_eq!(parse_line("", 2), Ok(None));
        assert_eq!(parse_line("Wed Apr 17 2013,8:00 pm,Boston Celtics,,Toronto Raptors,,", 3), Ok(None));
    }

    #[test]
    fn rejects_ties_and_unknown_teams() {
        let tie = parse_line("2013-01-05,LAL,100,BOS,100", 7);
        assert!(matches!(tie, Err(BeltError::MalformedLine { line: 7, .. })));

        let unknown = parse_line("2013-01-05,Springfield Isotopes,100,BOS,90", 8);
        assert!(matches!(unknown, Err(BeltError::MalformedLine { line: 8, .. })));
    }

    #[test]
    fn reads_whole_export() {
        let text = "\
Date,Start (ET),Visitor/Neutral,PTS,Home/Neutral,PTS
Tue Oct 30 2012,7:00 pm,Boston Celtics,107,Miami Heat,120
Tue Oct 30 2012,10:30 pm,Dallas Mavericks,99,Los Angeles Lakers,91
Wed Apr 17 2013,8:00 pm,Boston Celtics,,Toronto Raptors,
";
        let games = games_from_reader(Cursor::new(text)).unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].winner().code(), "MIA");
        assert_eq!(games[1].winner().code(), "DAL");
    }

    #[test]
    fn malformed_row_aborts_parse() {
        let text = "2013-01-05,LAL,100,BOS,90\n2013-01-06,LAL,100,BOS,100\n";
        let err = games_from_reader(Cursor::new(text)).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn loads_plain_or_compressed_season_logs() {
        let dir = std::env::temp_dir().join(format!("beltrace-seasons-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let packed = "2012-11-02,BOS,99,MIA,104\n";
        let compressed = zstd::encode_all(packed.as_bytes(), 3).unwrap();
        std::fs::write(dir.join("2012.txt.zst"), compressed).unwrap();

        assert_eq!(season_path(&dir, 2012), Some(dir.join("2012.txt.zst")));
        let games = load_season(&dir, 2012).unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].winner().code(), "MIA");

        // a plain log takes precedence over the compressed one
        std::fs::write(dir.join("2012.txt"), "2012-11-03,LAL,90,DAL,80\n2012-11-04,NYK,90,BOS,95\n").unwrap();
        assert_eq!(season_path(&dir, 2012), Some(dir.join("2012.txt")));
        let games = load_season(&dir, 2012).unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].winner().code(), "LAL");

        assert_eq!(season_path(&dir, 2011), None);
        let err = load_season(&dir, 2011).unwrap_err();
        assert!(err.to_string().contains("no game log for season 2011"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
