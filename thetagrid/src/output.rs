//! Rendering a search result for the terminal or for other programs.

use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;
use thetagrid_core::Position;
use thetagrid_paths::{Path, SearchStats};

use crate::error::CliResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One `x,z` waypoint per line followed by a summary.
    #[default]
    Text,
    /// A single JSON object.
    Json,
}

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub start: Position,
    pub end: Position,
    pub found: bool,
    pub path: &'a Path,
    pub length: f32,
    pub stats: SearchStats,
}

impl<'a> Report<'a> {
    pub fn new(start: Position, end: Position, path: &'a Path, stats: SearchStats) -> Self {
        Self {
            start,
            end,
            found: !path.is_empty(),
            path,
            length: path.length(),
            stats,
        }
    }

    pub fn write(&self, format: Format, out: &mut impl Write) -> CliResult<()> {
        match format {
            Format::Text => self.write_text(out),
            Format::Json => {
                serde_json::to_writer_pretty(&mut *out, self)?;
                writeln!(out)?;
                Ok(())
            }
        }
    }

    fn write_text(&self, out: &mut impl Write) -> CliResult<()> {
        if !self.found {
            writeln!(
                out,
                "no path from {} to {}",
                coordinate(self.start),
                coordinate(self.end)
            )?;
            return Ok(());
        }
        for &p in self.path {
            writeln!(out, "{}", coordinate(p))?;
        }
        writeln!(
            out,
            "# {} waypoints, length {:.3}, {} expanded",
            self.path.len(),
            self.length,
            self.stats.expanded
        )?;
        Ok(())
    }
}

/// `x,z`, the same form `--start` and `--end` accept.
fn coordinate(p: Position) -> String {
    format!("{},{}", p.x, p.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use thetagrid_map::CityMap;
    use thetagrid_paths::{ClearSight, PathFinder};

    fn render(report: &Report<'_>, format: Format) -> String {
        let mut buf = Vec::new();
        report.write(format, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn open_city() -> CityMap {
        CityMap::from_text("3 . # 0,0 2,2\n...\n...\n...\n").unwrap()
    }

    #[test]
    fn text_lists_waypoints() {
        let map = open_city();
        let mut finder = PathFinder::new();
        let path = finder
            .find_path(map.graph(), map.start(), map.end(), &ClearSight)
            .unwrap();
        let report = Report::new(map.start(), map.end(), &path, finder.stats());
        let text = render(&report, Format::Text);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(&lines[..2], &["0,0", "2,2"]);
        assert!(lines[2].starts_with("# 2 waypoints, length 2.828"));
    }

    #[test]
    fn text_reports_missing_route() {
        let path = Path::none();
        let start = Position::flat(0.0, 0.0);
        let end = Position::flat(9.0, 9.0);
        let report = Report::new(start, end, &path, SearchStats::default());
        assert_eq!(render(&report, Format::Text), "no path from 0,0 to 9,9\n");
    }

    #[test]
    fn json_object() {
        let map = open_city();
        let mut finder = PathFinder::new();
        let path = finder
            .find_path(map.graph(), map.start(), map.end(), &ClearSight)
            .unwrap();
        let report = Report::new(map.start(), map.end(), &path, finder.stats());
        let value: serde_json::Value =
            serde_json::from_str(&render(&report, Format::Json)).unwrap();
        assert_eq!(value["found"], true);
        assert_eq!(value["path"]["waypoints"].as_array().unwrap().len(), 2);
        assert_eq!(value["end"]["x"], 2.0);
        assert!(value["stats"]["expanded"].as_u64().unwrap() > 0);
    }
}
