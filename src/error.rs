//! Error type shared by the persistence and configuration collaborators.
//!
//! Nothing in the simulation itself returns errors; every failure here is
//! recoverable and the caller logs it and falls back.

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    /// Reading or writing a file failed.
    Io { path: PathBuf, source: io::Error },

    /// The high-score file exists but does not hold a valid record.
    CorruptScores { path: PathBuf, len: usize },

    /// The config file parsed but was rejected.
    Config { path: PathBuf, message: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io { path, source } => write!(f, "i/o error on {}: {}", path.display(), source),
            Error::CorruptScores { path, len } => write!(
                f,
                "high-score file {} is corrupt ({} bytes, bad magic or truncated)",
                path.display(),
                len
            ),
            Error::Config { path, message } => {
                write!(f, "invalid config {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
