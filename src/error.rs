use std::{io, path::PathBuf};

use mazecore::MazeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error("cannot access config file {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("error reading settings file ({path:?}), {source}")]
    Config {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("cannot serialize output: {0}")]
    Serialize(#[from] ron::Error),
    #[error("unknown log level '{0}'")]
    LogLevel(String),
    #[error("no preference directory found on this platform")]
    NoPreferenceDir,
    #[error("cannot install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
