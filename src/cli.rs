use std::path::PathBuf;

#[derive(Debug, Default, PartialEq)]
pub struct Cli {
    pub season: Option<i32>,   // falls back to config default_season
    pub html: Option<PathBuf>, // page destination; stdout when absent
    pub out: Option<PathBuf>,  // CSV standings
    pub no_cache: bool,
    pub verbose: bool,
    pub help: bool,
}

impl Cli {
    /// Where the page goes. A directory (existing, or given with a trailing
    /// slash) gets `<season>.html`, the name the season links point at.
    pub fn page_path(&self, season: i32) -> Option<PathBuf> {
        let dest = self.html.as_ref()?;
        let as_dir = dest.is_dir() || dest.to_string_lossy().ends_with('/');
        if as_dir {
            Some(dest.join(format!("{}.html", season)))
        } else {
            Some(dest.clone())
        }
    }
}

pub fn parse() -> Result<Cli, String> {
    parse_from(std::env::args().skip(1))
}

pub fn parse_from<I: IntoIterator<Item = String>>(args: I) -> Result<Cli, String> {
    let mut cli = Cli::default();

    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--season" | "-s" => {
                let v = it.next().ok_or("--season needs a year")?;
                let year = v.parse::<i32>().map_err(|_| format!("invalid season {:?}", v))?;
                cli.season = Some(year);
            }
            "--html" => {
                if let Some(p) = it.next() { cli.html = Some(PathBuf::from(p)); }
            }
            "--out" | "-o" => {
                if let Some(p) = it.next() { cli.out = Some(PathBuf::from(p)); }
            }
            "--no-cache" => cli.no_cache = true,
            "--verbose" | "-v" => cli.verbose = true,
            "--help" | "-h" => cli.help = true,
            other => return Err(format!("unknown argument {:?}", other)),
        }
    }

    Ok(cli)
}

pub fn print_help() {
    eprintln!(
r#"NBA Title Belt

Usage:
    beltrace [--season YEAR] [--html PAGE.html] [--out standings.csv] [--no-cache] [-v]

Options:
  --season, -s YEAR   Season to walk (2013 = 2013/2014). Default from config.toml.
  --html PATH         Write the HTML page to PATH instead of stdout. A directory
                      receives <season>.html; season links expect that name.
  --out, -o PATH      Also write the ranked standings as CSV.
  --no-cache          Recompute even when a fresh cached page exists.
  -v, --verbose       Debug logging on stderr (RUST_LOG overrides).
  -h, --help          Show this help.

Notes:
  • Game logs are read from <data_dir>/<season>.txt (or .txt.zst).
  • Prior champions per season live in config.toml [champions].
  • Walking the current calendar year's season also writes leader.json.
"#);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_all_flags() {
        let cli = parse_from(args(&["-s", "2011", "--html", "page.html", "-o", "s.csv", "--no-cache", "-v"])).unwrap();
        assert_eq!(cli.season, Some(2011));
        assert_eq!(cli.html, Some(PathBuf::from("page.html")));
        assert_eq!(cli.out, Some(PathBuf::from("s.csv")));
        assert!(cli.no_cache);
        assert!(cli.verbose);
        assert!(!cli.help);
    }

    #[test]
    fn page_path_names_pages_by_season_in_directories() {
        let dir = std::env::temp_dir();
        let cli = parse_from(vec!["--html".to_string(), dir.to_string_lossy().into_owned()]).unwrap();
        assert_eq!(cli.page_path(2012), Some(dir.join("2012.html")));

        let cli = parse_from(args(&["--html", "site/"])).unwrap();
        assert_eq!(cli.page_path(2011), Some(PathBuf::from("site/").join("2011.html")));

        let cli = parse_from(args(&["--html", "belt.html"])).unwrap();
        assert_eq!(cli.page_path(2013), Some(PathBuf::from("belt.html")));

        assert_eq!(Cli::default().page_path(2013), None);
    }

    #[test]
    fn empty_args_use_defaults() {
        assert_eq!(parse_from(Vec::new()).unwrap(), Cli::default());
    }

    #[test]
    fn rejects_bad_season_and_unknown_flags() {
        assert!(parse_from(args(&["--season", "next"])).is_err());
        assert!(parse_from(args(&["--season"])).is_err());
        assert!(parse_from(args(&["--bogus"])).is_err());
    }
}
