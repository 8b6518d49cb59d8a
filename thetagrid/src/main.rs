//! thetagrid command-line tool: load a city map, find an any-angle route
//! between two cells and print its waypoints.

mod config;
mod error;
mod output;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use log::{debug, info};
use thetagrid_core::Position;
use thetagrid_map::{CityMap, MapDescription};
use thetagrid_paths::{ClearSight, LineOfSight, PathFinder};

use config::Config;
use error::{CliError, CliResult};
use output::{Format, Report};

/// Find an any-angle route through a city map.
#[derive(Parser, Debug)]
#[command(name = "thetagrid", version, about)]
struct Cli {
    /// Map file, in the XML city format or the plain-text format
    map: PathBuf,

    /// TOML file with [search] and [sight] settings
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Override the map's start coordinate ("x,z")
    #[arg(long)]
    start: Option<Position>,

    /// Override the map's end coordinate ("x,z")
    #[arg(long)]
    end: Option<Position>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Treat every segment as visible instead of testing closed cells
    #[arg(long)]
    clear_sight: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> CliResult<()> {
    let config = match &cli.config {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            Config::from_file(path)?
        }
        None => Config::default(),
    };
    debug!("{config:?}");

    let map = load_map(&cli.map)?;
    let start = cli.start.unwrap_or_else(|| map.start());
    let end = cli.end.unwrap_or_else(|| map.end());

    let sight: Box<dyn LineOfSight> = if cli.clear_sight {
        Box::new(ClearSight)
    } else {
        Box::new(map.grid_sight(config.sight))
    };

    let mut finder = PathFinder::with_config(config.search);
    let path = finder.find_path(map.graph(), start, end, sight.as_ref())?;
    let report = Report::new(start, end, &path, finder.stats());
    report.write(cli.format, &mut io::stdout().lock())
}

fn load_map(path: &Path) -> CliResult<CityMap> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let description = parse_map(&text).map_err(|source| CliError::Map {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "loaded {}x{} map from {}",
        description.width(),
        description.height(),
        path.display()
    );
    Ok(CityMap::new(description))
}

/// Documents starting with `<` are XML; anything else is the text format.
fn parse_map(text: &str) -> thetagrid_map::MapResult<MapDescription> {
    if text.trim_start().starts_with('<') {
        MapDescription::from_xml(text)
    } else {
        MapDescription::from_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_arguments() {
        let cli = Cli::try_parse_from([
            "thetagrid",
            "city.xml",
            "--start",
            "1,2",
            "--format",
            "json",
            "--clear-sight",
        ])
        .unwrap();
        assert_eq!(cli.map, PathBuf::from("city.xml"));
        assert_eq!(cli.start, Some(Position::flat(1.0, 2.0)));
        assert_eq!(cli.end, None);
        assert_eq!(cli.format, Format::Json);
        assert!(cli.clear_sight);
        assert!(Cli::try_parse_from(["thetagrid", "city.xml", "--end", "1;2"]).is_err());
    }

    #[test]
    fn detects_map_format() {
        let xml = r##"<City Size="2" Open="." Closed="#" Start="0,0" End="1,1">
            <Line Id="0">..</Line><Line Id="1">..</Line></City>"##;
        let text = "2 . # 0,0 1,1\n..\n..\n";
        assert_eq!(parse_map(xml).unwrap(), parse_map(text).unwrap());
        assert!(parse_map("\n  <City/>").is_err());
    }
}
