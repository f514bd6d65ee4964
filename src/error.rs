//! Error taxonomy: configuration problems abort before any search, data problems abort at
//! load time, presentation problems surface after the search has finished.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid parameters. Raised before a roster is searched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid stat name '{0}'. Choose from: [Energy, Fighting, Strength, Intellect]")]
    InvalidDimension(String),
    #[error("invalid tier composition '{input}': {reason}")]
    InvalidComposition { input: String, reason: String },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Malformed or unreadable roster source.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read roster {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unsupported roster format for {0} (expected .csv, .xlsx, .xls or .ods)")]
    UnsupportedFormat(PathBuf),
    #[error("{source_name}: missing required column '{column}'")]
    MissingColumn { source_name: String, column: &'static str },
    #[error("{source_name} row {row}: invalid {column} value '{value}'")]
    InvalidStat {
        source_name: String,
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("{source_name} row {row}: character name is empty")]
    EmptyName { source_name: String, row: usize },
    #[error("{source_name}: malformed CSV: {source}")]
    Csv {
        source_name: String,
        #[source]
        source: csv::Error,
    },
    #[error("{source_name}: spreadsheet error: {message}")]
    Spreadsheet { source_name: String, message: String },
}

/// Output could not be written or shown.
#[derive(Debug, Error)]
pub enum PresentError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize teams: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to launch viewer for {path}: {reason}")]
    Viewer { path: PathBuf, reason: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Present(#[from] PresentError),
}

impl Error {
    /// Process exit code for this failure: configuration problems are usage errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Data(_) | Self::Present(_) => 1,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
