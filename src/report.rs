//! HTML page for one season.

use std::collections::HashMap;
use std::fmt::Write;

use crate::belt::{rank_labels, BeltRun};
use crate::model::{Game, Team, TeamStats};

/// A game log row with the winner's current streak and running belt wins.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRow<'a> {
    pub game: &'a Game,
    pub streak: u32,
    pub winner_wins: u32,
}

/// Annotate the belt log. The streak restarts whenever a different team wins.
pub fn log_rows(log: &[Game]) -> Vec<LogRow<'_>> {
    let mut wins: HashMap<&Team, u32> = HashMap::new();
    let mut last_winner: Option<&Team> = None;
    let mut streak = 0u32;

    log.iter()
        .map(|game| {
            let winner = game.winner();
            let total = wins.entry(winner).or_insert(0);
            *total += 1;
            if last_winner != Some(winner) {
                last_winner = Some(winner);
                streak = 0;
            }
            streak += 1;
            LogRow { game, streak, winner_wins: *total }
        })
        .collect()
}

/// Everything the page shows besides the belt run itself.
pub struct PageContext<'a> {
    pub season: i32,
    pub seasons: &'a [i32],
    pub next_champion: Option<&'a Team>,
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn logo(team: &Team) -> String {
    format!(
        r#"<img src="{}" alt="{}">"#,
        escape_html(&team.logo_url()),
        escape_html(team.code())
    )
}

fn season_label(year: i32) -> String {
    format!("{}/{}", year, year + 1)
}

/// "50" for whole percentages, "66.67" otherwise.
fn format_percent(p: f64) -> String {
    if p.fract() == 0.0 {
        format!("{}", p as i64)
    } else {
        let s = format!("{:.2}", p);
        s.trim_end_matches('0').to_string()
    }
}

const STYLE: &str = r#"
            * { margin: 0; padding: 0; }
            html, body { width: 100%; height: 100%; }
            body { font-family: Arial, sans-serif; font-size: 12px; }
            #container { margin: 20px; }
            h1 { font-weight: normal; font-size: 38px; margin: 0 0 5px 0; }
            h2 { font-weight: normal; font-size: 16px; margin: 16px 0 8px 0; text-transform: uppercase; }
            li { margin-left: 20px; }
            a { color: #333; }
            .champs p img { vertical-align: middle; }
            .champs p { line-height: 24px; }
            .seasons { margin: 0 0 20px 0; }
            .title-winner { font-size: 32px; }
            table { border-collapse: collapse; }
            th, td { border: 1px solid #666; padding: 2px 4px; text-align: left; }
            th { background-color: #777; color: #fff; }
            th[colspan] { text-align: center; }
            td img { vertical-align: middle; }
            tr:nth-child(even) { background-color: #f5f5f5; }
            .col { float: left; margin: 0 50px 20px 0; }
            .clear { clear: left; }
"#;

/// Render the season page.
pub fn render(run: &BeltRun, ranked: &[(Team, TeamStats)], ctx: &PageContext<'_>) -> String {
    let mut html = String::with_capacity(16 * 1024);
    // writing into a String cannot fail
    let _ = write_page(&mut html, run, ranked, ctx);
    html
}

fn write_page(
    out: &mut String,
    run: &BeltRun,
    ranked: &[(Team, TeamStats)],
    ctx: &PageContext<'_>,
) -> std::fmt::Result {
    let title = format!("NBA Championship Belt {}", season_label(ctx.season));

    writeln!(out, "<!DOCTYPE html>\n<html>\n    <head>")?;
    writeln!(out, "        <title>{}</title>", title)?;
    writeln!(out, "        <style>{}        </style>\n    </head>", STYLE)?;
    writeln!(out, "    <body>\n        <div id=\"container\">")?;
    writeln!(out, "            <h1>{}</h1>", title)?;

    writeln!(out, "            <p class=\"seasons\">")?;
    for year in ctx.seasons {
        writeln!(out, "                <a href=\"{}.html\">{}</a>", year, season_label(*year))?;
    }
    writeln!(out, "            </p>")?;

    writeln!(out, "            <div class=\"col\">\n                <h2>Winner of Title Belt</h2>")?;
    writeln!(
        out,
        "                <div class=\"title-winner\">{} {}</div>\n            </div>",
        logo(&run.holder),
        escape_html(run.holder.code())
    )?;

    writeln!(out, "            <div class=\"col\">\n                <h2>NBA Champs</h2>")?;
    writeln!(out, "                <div class=\"champs\">")?;
    writeln!(
        out,
        "                    <p>{} {} ({})</p>",
        logo(&run.champion),
        escape_html(run.champion.code()),
        season_label(ctx.season - 1)
    )?;
    match ctx.next_champion {
        Some(next) => writeln!(
            out,
            "                    <p>{} {} ({})</p>",
            logo(next),
            escape_html(next.code()),
            season_label(ctx.season)
        )?,
        None => writeln!(out, "                    <p>TBD. ({})</p>", season_label(ctx.season))?,
    }
    writeln!(out, "                </div>\n            </div>")?;

    writeln!(
        out,
        r#"            <div class="col">
                <h2>Rules</h2>
                <ul>
                    <li>It starts with the first game of last season's NBA champion.</li>
                    <li>If the belt holding team gets beat it loses the belt to the other team.</li>
                    <li>No playoffs, the race is over after the regular season.</li>
                </ul>
            </div>
            <div class="col">
                <h2>Data Sources</h2>
                <p>
                    Idea: <a href="http://www.reddit.com/r/nba/comments/1pn9t2/can_we_keep_track_of_the_owner_of_the/">/u/hckygod91 on reddit</a><br>
                    Scores: <a href="http://www.basketball-reference.com/">basketball-reference.com</a><br>
                    Logos: <a href="http://www.nba.com/">nba.com</a>
                </p>
            </div>
            <div class="clear"></div>"#
    )?;

    write_game_log(out, &run.log)?;
    write_stats(out, ranked)?;

    writeln!(out, "            <div class=\"clear\"></div>\n        </div>\n    </body>\n</html>")
}

fn write_game_log(out: &mut String, log: &[Game]) -> std::fmt::Result {
    writeln!(
        out,
        r#"            <div class="col">
                <h2>Game Log</h2>
                <table>
                    <thead>
                        <tr><th>Date</th><th>Home Team</th><th>Score</th><th>Away Team</th><th>Winner</th><th>Streak</th><th>Wins</th></tr>
                    </thead>
                    <tbody>"#
    )?;
    for row in log_rows(log) {
        let g = row.game;
        writeln!(
            out,
            "                        <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{} {}</td><td>{}</td><td>{}</td></tr>",
            g.date(),
            escape_html(g.home().code()),
            g.score(),
            escape_html(g.away().code()),
            logo(g.winner()),
            escape_html(g.winner().code()),
            row.streak,
            row.winner_wins
        )?;
    }
    writeln!(out, "                    </tbody>\n                </table>\n            </div>")
}

fn write_stats(out: &mut String, ranked: &[(Team, TeamStats)]) -> std::fmt::Result {
    writeln!(
        out,
        r#"            <div class="col">
                <h2>Stats</h2>
                <table>
                    <thead>
                        <tr>
                            <th rowspan="2">Rank</th><th rowspan="2">Team</th><th rowspan="2">Games</th>
                            <th colspan="3">Wins</th><th colspan="3">Losses</th><th rowspan="2">Win %</th>
                        </tr>
                        <tr>
                            <th>Total</th><th><small>As Challenger</small></th><th><small>As Defender</small></th>
                            <th>Total</th><th><small>As Challenger</small></th><th><small>As Defender</small></th>
                        </tr>
                    </thead>
                    <tbody>"#
    )?;
    for ((team, s), label) in ranked.iter().zip(rank_labels(ranked)) {
        let rank = label.map(|r| format!("{}.", r)).unwrap_or_default();
        writeln!(
            out,
            "                        <tr><td>{}</td><td>{} {}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}%</td></tr>",
            rank,
            logo(team),
            escape_html(team.code()),
            s.games,
            s.wins,
            s.won_as_challenger,
            s.won_as_defender,
            s.losses,
            s.lost_as_challenger,
            s.lost_as_defender,
            format_percent(s.win_percent)
        )?;
    }
    writeln!(out, "                    </tbody>\n                </table>\n            </div>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::belt::{rank, simulate, Schedule};
    use chrono::NaiveDate;

    fn game(home: &str, hs: u32, away: &str, aws: u32, day: u32) -> Game {
        let date = NaiveDate::from_ymd_opt(2013, 2, day).unwrap();
        Game::new(Team::new(home), Team::new(away), hs, aws, date).unwrap()
    }

    #[test]
    fn streak_resets_when_winner_changes() {
        let log = vec![
            game("BOS", 98, "LAL", 95, 1),
            game("BOS", 99, "NYK", 95, 2),
            game("LAL", 100, "BOS", 90, 3),
            game("BOS", 101, "LAL", 97, 4),
        ];
        let rows = log_rows(&log);
        let streaks: Vec<u32> = rows.iter().map(|r| r.streak).collect();
        let wins: Vec<u32> = rows.iter().map(|r| r.winner_wins).collect();
        assert_eq!(streaks, vec![1, 2, 1, 1]);
        assert_eq!(wins, vec![1, 2, 1, 3]);
    }

    #[test]
    fn percent_formatting() {
        assert_eq!(format_percent(50.0), "50");
        assert_eq!(format_percent(0.0), "0");
        assert_eq!(format_percent(66.67), "66.67");
        assert_eq!(format_percent(12.5), "12.5");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn page_shows_holder_log_and_standings() {
        let schedule = Schedule::new(vec![
            game("BOS", 98, "LAL", 95, 1),
            game("LAL", 100, "BOS", 90, 2),
            game("MIA", 80, "ORL", 70, 3),
        ]);
        let run = simulate(&Team::new("BOS"), &schedule);
        let ranked = rank(&run.stats);
        let seasons = [2012, 2013];
        let ctx = PageContext { season: 2013, seasons: &seasons, next_champion: None };
        let page = render(&run, &ranked, &ctx);

        assert!(page.contains("<title>NBA Championship Belt 2013/2014</title>"));
        assert!(page.contains(r#"<div class="title-winner"><img src="/img/teams/LAL.gif" alt="LAL"> LAL</div>"#));
        assert!(page.contains("TBD. (2013/2014)"));
        assert!(page.contains(r#"<a href="2012.html">2012/2013</a>"#));
        assert!(page.contains("<td>2013-02-02</td><td>LAL</td><td>100-90</td><td>BOS</td>"));
        assert!(!page.contains("<td>MIA</td><td>80-70</td>"));
        assert!(page.contains("<td>50%</td>"));
        assert!(page.contains("<td>1.</td>"));
        assert!(page.contains("/u/hckygod91 on reddit"));
    }
}
