use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};

use log::LevelFilter;
use mazecore::{Algorithm, Difficulty};
use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{base_path, SETTINGS_FILE},
    error::AppError,
};

const DEFAULT_WIDTH: usize = 31;
const DEFAULT_HEIGHT: usize = 21;

/// Non-empty, duplicate-free list of algorithms to run, in the order given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlgorithmSet(Vec<Algorithm>);

impl AlgorithmSet {
    pub fn all() -> Self {
        Self(Algorithm::ALL.to_vec())
    }

    pub fn is_all(&self) -> bool {
        Algorithm::ALL.iter().all(|alg| self.0.contains(alg))
    }

    pub fn iter(&self) -> impl Iterator<Item = Algorithm> + '_ {
        self.0.iter().copied()
    }
}

impl Default for AlgorithmSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromStr for AlgorithmSet {
    type Err = String;

    /// Accepts `all` or a comma separated list such as `bfs,astar`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::all());
        }

        let mut algorithms = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let algorithm = part.parse::<Algorithm>()?;
            if !algorithms.contains(&algorithm) {
                algorithms.push(algorithm);
            }
        }

        if algorithms.is_empty() {
            return Err("no algorithm given".to_string());
        }
        Ok(Self(algorithms))
    }
}

impl fmt::Display for AlgorithmSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<_> = self.0.iter().map(Algorithm::tag).collect();
        f.write_str(&tags.join(","))
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub width: Option<usize>,
    #[serde(default)]
    pub height: Option<usize>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub algorithms: Option<AlgorithmSet>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_path() -> Result<PathBuf, AppError> {
        Ok(base_path()?.join(SETTINGS_FILE))
    }

    pub fn populate(mut self) -> Self {
        self.width = Some(self.get_width());
        self.height = Some(self.get_height());
        self.difficulty = Some(self.get_difficulty());
        self.algorithms = Some(self.get_algorithms());
        self.log_level = Some(self.log_level.unwrap_or_else(|| "warn".to_string()));

        self
    }

    pub fn set_width(mut self, value: usize) -> Self {
        self.width = Some(value);
        self
    }

    pub fn get_width(&self) -> usize {
        self.width.unwrap_or(DEFAULT_WIDTH)
    }

    pub fn set_height(mut self, value: usize) -> Self {
        self.height = Some(value);
        self
    }

    pub fn get_height(&self) -> usize {
        self.height.unwrap_or(DEFAULT_HEIGHT)
    }

    pub fn set_difficulty(mut self, value: Difficulty) -> Self {
        self.difficulty = Some(value);
        self
    }

    pub fn get_difficulty(&self) -> Difficulty {
        self.difficulty.unwrap_or_default()
    }

    pub fn set_algorithms(mut self, value: AlgorithmSet) -> Self {
        self.algorithms = Some(value);
        self
    }

    pub fn get_algorithms(&self) -> AlgorithmSet {
        self.algorithms.clone().unwrap_or_default()
    }

    pub fn set_seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn set_log_level(mut self, value: LevelFilter) -> Self {
        self.log_level = Some(value.as_str().to_ascii_lowercase());
        self
    }

    pub fn get_log_level(&self) -> Result<LevelFilter, AppError> {
        match &self.log_level {
            Some(level) => level.parse().map_err(|_| AppError::LogLevel(level.clone())),
            None => Ok(LevelFilter::Warn),
        }
    }

    fn options() -> ron::Options {
        ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
    }

    fn parse(path: &Path, source: &str) -> Result<Self, AppError> {
        Self::options()
            .from_str(source)
            .map_err(|source| AppError::Config {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Reads the settings, writing the bundled defaults first if the file does not exist yet.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let default_settings_string = include_str!("./default_settings.ron");

        match fs::read_to_string(path) {
            Ok(settings_string) => Self::parse(path, &settings_string),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("Creating default settings at {:?}", path);
                write_file(path, default_settings_string)?;
                Self::parse(path, default_settings_string)
            }
            Err(source) => Err(AppError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn reset_config(path: &Path) -> Result<(), AppError> {
        write_file(path, include_str!("./default_settings.ron"))
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), AppError> {
    let io_err = |source| AppError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, content).map_err(io_err)
}
