mod app;
mod help;
mod theme;
mod widget;
use crate::app::App;
use anyhow::Context;
use heatcal::calendar::WeekStart;
use heatcal::config::{Config, LabelOverrides};
use heatcal::data::Dataset;
use heatcal::heatmap::{CalendarSession, Chart, YearGrid};
use heatcal::scale::{ColorError, ColorScale, Rgb};
use heatcal::surface::{Scene, SceneHost};
use heatcal::svg::html_page;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Options {
    data: PathBuf,
    week_start: WeekStart,
    weekly_summary: bool,
    width: Option<f64>,
    height: Option<f64>,
    cell_size: Option<f64>,
    domain: Option<(f64, f64)>,
    palette: Option<Vec<Rgb>>,
    labels: Option<PathBuf>,
    key: Option<String>,
    output: Option<PathBuf>,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = Options::default();
        let mut data = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('s') | Arg::Long("sunday") => opts.week_start = WeekStart::Sunday,
                Arg::Short('w') | Arg::Long("weekly") => opts.weekly_summary = true,
                Arg::Long("width") => opts.width = Some(parser.value()?.parse_with(parse_length)?),
                Arg::Long("height") => {
                    opts.height = Some(parser.value()?.parse_with(parse_length)?);
                }
                Arg::Long("cell-size") => {
                    opts.cell_size = Some(parser.value()?.parse_with(parse_length)?);
                }
                Arg::Long("domain") => opts.domain = Some(parser.value()?.parse_with(parse_domain)?),
                Arg::Long("palette") => {
                    opts.palette = Some(parser.value()?.parse_with(parse_palette)?);
                }
                Arg::Long("labels") => opts.labels = Some(PathBuf::from(parser.value()?)),
                Arg::Short('k') | Arg::Long("key") => opts.key = Some(parser.value()?.string()?),
                Arg::Short('o') | Arg::Long("output") => {
                    opts.output = Some(PathBuf::from(parser.value()?));
                }
                Arg::Value(value) if data.is_none() => data = Some(PathBuf::from(value)),
                _ => return Err(arg.unexpected()),
            }
        }
        opts.data = data.ok_or_else(|| lexopt::Error::from("missing DATA argument"))?;
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => opts.run(),
            Command::Help => {
                println!("Usage: heatcal [OPTIONS] <DATA.json>");
                println!();
                println!("Calendar heat maps of per-day values");
                println!();
                println!("DATA.json maps YYYY-MM-DD dates to numbers or to objects of numbers.");
                println!();
                println!("Options:");
                println!("  -s, --sunday          Start weeks on Sunday instead of Monday");
                println!("  -w, --weekly          Add a row of weekly averages");
                println!("      --width N         Width of each chart [default: 960]");
                println!("      --height N        Height of each chart [default: 136]");
                println!("      --cell-size N     Size of each day [default: 17]");
                println!("      --domain LO,HI    Values mapped onto the palette [default: 0,5]");
                println!("      --palette COLORS  Comma-separated #rrggbb colors, low to high");
                println!("      --labels FILE     JSON file of \"day\", \"month\" & \"legend\" labels");
                println!("  -k, --key KEY         Initially color records by KEY");
                println!("  -o, --output FILE     Write an HTML page instead of showing the calendar");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

impl Options {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = Config::default()
            .with_week_start(self.week_start)
            .with_weekly_summary(self.weekly_summary);
        if let Some(width) = self.width {
            config = config.with_width(width);
        }
        if let Some(height) = self.height {
            config = config.with_height(height);
        }
        if let Some(cell_size) = self.cell_size {
            config = config.with_cell_size(cell_size);
        }
        if self.domain.is_some() || self.palette.is_some() {
            let defaults = ColorScale::default();
            let scale = ColorScale::new(
                self.domain.unwrap_or_else(|| defaults.domain()),
                self.palette
                    .clone()
                    .unwrap_or_else(|| defaults.palette().to_vec()),
            )
            .context("invalid color scale")?;
            config = config.with_color_scale(scale);
        }
        if let Some(path) = &self.labels {
            let src = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let overrides = serde_json::from_str::<LabelOverrides>(&src)
                .with_context(|| format!("failed to parse labels from {}", path.display()))?;
            config = config.with_labels(overrides);
        }
        Ok(config)
    }

    fn run(self) -> anyhow::Result<()> {
        let config = self.config()?;
        let src = fs::read_to_string(&self.data)
            .with_context(|| format!("failed to read {}", self.data.display()))?;
        let dataset = Dataset::from_json(&src)
            .with_context(|| format!("failed to load data from {}", self.data.display()))?;
        let mut session = CalendarSession::<Scene>::new(config);
        session.render(dataset, &mut SceneHost);
        let key = match self.key {
            Some(key) => {
                if !session.rollup_keys().contains(&key) {
                    tracing::warn!(key = %key, "Rollup key does not occur in the data");
                }
                session.dispatch_update(Some(&key));
                Some(key)
            }
            None => session.rollup_keys().first().map(String::from),
        };
        match self.output {
            Some(path) => {
                let title = self.data.display().to_string();
                let page = html_page(
                    &title,
                    session
                        .charts()
                        .iter()
                        .flat_map(Chart::grids)
                        .map(YearGrid::surface),
                    session.legend(),
                );
                fs::write(&path, page)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                tracing::info!(path = %path.display(), "Wrote calendar");
                Ok(())
            }
            None => with_terminal(|terminal| {
                App::new(session, key).run(terminal)?;
                Ok(())
            }),
        }
    }
}

fn parse_length(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => Ok(n),
        _ => Err(format!("expected a positive number, got {s:?}")),
    }
}

fn parse_domain(s: &str) -> Result<(f64, f64), String> {
    let err = || format!("expected LO,HI, got {s:?}");
    let (lo, hi) = s.split_once(',').ok_or_else(err)?;
    let lo = lo.trim().parse::<f64>().map_err(|_| err())?;
    let hi = hi.trim().parse::<f64>().map_err(|_| err())?;
    Ok((lo, hi))
}

fn parse_palette(s: &str) -> Result<Vec<Rgb>, ColorError> {
    s.split(',').map(|c| c.trim().parse::<Rgb>()).collect()
}

fn main() -> anyhow::Result<()> {
    init_logging();
    Command::from_parser(Parser::from_env())?.run()
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .try_init();
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_iter(
            std::iter::once("heatcal").chain(args.iter().copied()).map(OsString::from),
        ))
    }

    #[test]
    fn test_defaults() {
        let Ok(Command::Run(opts)) = parse(&["data.json"]) else {
            panic!("expected a run command");
        };
        assert_eq!(opts.data, PathBuf::from("data.json"));
        assert_eq!(opts.week_start, WeekStart::Monday);
        assert!(!opts.weekly_summary);
        assert_eq!(opts.config().unwrap(), Config::default());
    }

    #[test]
    fn test_all_options() {
        let Ok(Command::Run(opts)) = parse(&[
            "-sw",
            "--width=500",
            "--height",
            "100",
            "--cell-size",
            "9",
            "--domain",
            "1, 9",
            "--palette",
            "#000,#ffffff",
            "-k",
            "steps",
            "-o",
            "out.html",
            "data.json",
        ]) else {
            panic!("expected a run command");
        };
        assert_eq!(opts.week_start, WeekStart::Sunday);
        assert!(opts.weekly_summary);
        assert_eq!(opts.domain, Some((1.0, 9.0)));
        assert_eq!(
            opts.palette,
            Some(vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)])
        );
        assert_eq!(opts.key.as_deref(), Some("steps"));
        assert_eq!(opts.output, Some(PathBuf::from("out.html")));
        let config = opts.config().unwrap();
        assert_eq!(config.width(), 500.0);
        assert_eq!(config.height(), 100.0);
        assert_eq!(config.cell_size(), 9.0);
        assert_eq!(config.week_start(), WeekStart::Sunday);
        assert!(config.weekly_summary());
        assert_eq!(config.color_scale().domain(), (1.0, 9.0));
        assert_eq!(config.color_scale().palette().len(), 2);
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["data.json", "--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["-V"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_bad_arguments() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["a.json", "b.json"]).is_err());
        assert!(parse(&["--width", "-3", "a.json"]).is_err());
        assert!(parse(&["--domain", "5", "a.json"]).is_err());
        assert!(parse(&["--palette", "red", "a.json"]).is_err());
        assert!(parse(&["--frobnicate", "a.json"]).is_err());
    }

    #[test]
    fn test_reversed_domain_is_rejected() {
        let Ok(Command::Run(opts)) = parse(&["--domain", "5,1", "a.json"]) else {
            panic!("expected a run command");
        };
        assert!(opts.config().is_err());
    }
}
