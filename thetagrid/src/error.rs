use std::io;
use std::path::PathBuf;

use thetagrid_map::MapFormatError;
use thetagrid_paths::SearchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config '{}': {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid map '{}': {source}", path.display())]
    Map {
        path: PathBuf,
        #[source]
        source: MapFormatError,
    },

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("cannot encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot write output: {0}")]
    Write(#[from] io::Error),
}

pub type CliResult<T> = Result<T, CliError>;
