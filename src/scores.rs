use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const MAGIC: &[u8; 4] = b"INV1";
// File size: 4 magic + 4 score = 8 bytes
const FILE_SIZE: usize = 4 + 4;
const SCORES_FILE: &str = "invaders.scores";

/// Where the best score lives between sessions.
pub trait HighScoreStore {
    fn read_high_score(&mut self) -> Result<u32>;
    fn write_high_score(&mut self, score: u32) -> Result<()>;
}

/// Binary high-score file: `INV1` followed by a little-endian u32.
#[derive(Clone, Debug)]
pub struct FileHighScores {
    path: PathBuf,
}

impl FileHighScores {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store next to the executable, like the config file.
    pub fn beside_executable() -> Self {
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                return Self::new(dir.join(SCORES_FILE));
            }
        }
        Self::new(SCORES_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScores {
    fn read_high_score(&mut self) -> Result<u32> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(Error::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if data.len() < FILE_SIZE || &data[0..4] != MAGIC {
            return Err(Error::CorruptScores {
                path: self.path.clone(),
                len: data.len(),
            });
        }
        let bytes: [u8; 4] = [data[4], data[5], data[6], data[7]];
        Ok(u32::from_le_bytes(bytes))
    }

    fn write_high_score(&mut self, score: u32) -> Result<()> {
        let mut buf = Vec::with_capacity(FILE_SIZE);
        buf.extend_from_slice(MAGIC);
        buf.extend_from_slice(&score.to_le_bytes());
        fs::write(&self.path, &buf).map_err(|source| Error::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Keeps the score in memory only. Used by tests and when no file is wanted.
#[derive(Clone, Debug, Default)]
pub struct MemoryHighScores {
    score: u32,
    pub writes: usize,
}

impl MemoryHighScores {
    pub fn with_score(score: u32) -> Self {
        Self { score, writes: 0 }
    }
}

impl HighScoreStore for MemoryHighScores {
    fn read_high_score(&mut self) -> Result<u32> {
        Ok(self.score)
    }

    fn write_high_score(&mut self, score: u32) -> Result<()> {
        self.score = score;
        self.writes += 1;
        Ok(())
    }
}

/// Reads the stored best, treating any failure as 0 for this session.
pub fn read_or_zero(store: &mut dyn HighScoreStore) -> u32 {
    match store.read_high_score() {
        Ok(score) => {
            tracing::debug!("high score read: {score}");
            score
        }
        Err(err) => {
            tracing::warn!("could not read high score, starting from 0: {err}");
            0
        }
    }
}

/// Persists a new best. Failures are logged and otherwise ignored.
pub fn report_new_best(store: &mut dyn HighScoreStore, score: u32) {
    if let Err(err) = store.write_high_score(score) {
        tracing::warn!("could not write high score {score}: {err}");
    }
}
