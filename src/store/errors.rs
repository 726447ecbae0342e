use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tokio::task::JoinError;

use crate::models::ParseError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read [{}]: {source}", path.display())]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("Failed to write [{}]: {source}", path.display())]
    Write {
        path: PathBuf,
        source: io::Error,
    },
    #[error("Malformed CSV in [{}]: {source}", path.display())]
    Csv {
        path: PathBuf,
        source: csv::Error,
    },
    #[error("Invalid data in row {row}: {source}")]
    Row {
        row: usize,
        source: ParseError,
    },
    #[error("Character '{character}' cannot be stored in a Latin-1 file")]
    Encoding {
        character: char,
    },
    #[error("A record with serial number {serial} already exists")]
    DuplicateSerial {
        serial: i64,
    },
    #[error("Storage task failed: {0}")]
    Background(#[from] JoinError),
}

impl StoreError {
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read { path: path.into(), source }
    }

    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write { path: path.into(), source }
    }

    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv { path: path.into(), source }
    }
}
