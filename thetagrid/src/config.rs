//! Optional TOML configuration for the command-line tool.
//!
//! ```toml
//! [search]
//! any_angle = true
//! max_expansions = 100000
//!
//! [sight]
//! half_extent = 0.5
//! ```
//!
//! Every section and field may be omitted.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thetagrid_map::SightConfig;
use thetagrid_paths::SearchConfig;

use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub search: SearchConfig,
    pub sight: SightConfig,
}

impl Config {
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
