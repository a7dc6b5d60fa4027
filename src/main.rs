mod belt;
mod cache;
mod cli;
mod config;
mod error;
mod leader;
mod model;
mod parser;
mod report;
mod teams;
mod verbose;

use std::path::Path;

use anyhow::Context;
use tracing::{debug, info, warn};

use crate::belt::{rank, simulate, write_csv, Schedule};
use crate::cache::{write_creating_dirs, PageCache};
use crate::report::PageContext;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = match cli::parse() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}", e);
            cli::print_help();
            std::process::exit(2);
        }
    };
    if args.help {
        cli::print_help();
        return Ok(());
    }
    verbose::init(args.verbose);

    let cfg = config::Config::load();
    let season = args.season.unwrap_or(cfg.default_season);
    let champion = cfg.champion(season)?;

    let cache = PageCache::new(&cfg.cache_dir, cfg.cache_lifetime_secs);
    // a CSV request always needs the standings, so only page-only runs short-circuit
    if !args.no_cache && args.out.is_none() {
        if let Some(page) = cache.fresh(season) {
            return emit_page(&page, args.page_path(season).as_deref());
        }
    }

    let games = parser::load_season(&cfg.data_dir, season)?;
    let schedule = Schedule::new(games);
    if schedule.is_empty() {
        warn!(season, "no played games in the log; the champion keeps the belt");
    }
    let run = simulate(&champion, &schedule);
    info!(season, champion = %champion, holder = %run.holder, belt_games = run.log.len(), "belt walked");
    if let Some(s) = run.stats.get(&run.holder) {
        debug!(holder = %run.holder, wins = s.wins, losses = s.losses, win_pct = s.win_percent, "holder record");
    }

    leader::publish(&cfg.leader_path, season, &run.holder)
        .with_context(|| format!("writing {}", cfg.leader_path.display()))?;

    let ranked = rank(&run.stats);
    if let Some(out) = args.out.as_deref() {
        write_csv(&ranked, out).with_context(|| format!("writing {}", out.display()))?;
        debug!(path = %out.display(), rows = ranked.len(), "standings written");
    }

    let seasons = cfg.seasons();
    let next_champion = cfg.next_champion(season);
    let ctx = PageContext { season, seasons: &seasons, next_champion: next_champion.as_ref() };
    let page = report::render(&run, &ranked, &ctx);

    if let Err(e) = cache.store(season, &page) {
        warn!(error = %e, "could not cache page");
    }
    emit_page(&page, args.page_path(season).as_deref())
}

fn emit_page(page: &str, dest: Option<&Path>) -> anyhow::Result<()> {
    match dest {
        Some(path) => write_creating_dirs(path, page),
        None => {
            print!("{}", page);
            Ok(())
        }
    }
}
