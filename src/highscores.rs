//! High score persistence
//!
//! A single integer kept in a small JSON file next to the binary.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk shape of the high score file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u32,
}

/// File-backed high score
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored record. A missing or unreadable file counts as 0.
    pub fn load(&self) -> u32 {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high score at {}, starting fresh", self.path.display());
                return 0;
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}", self.path.display(), e);
                return 0;
            }
        };

        match serde_json::from_str::<HighScoreFile>(&json) {
            Ok(file) => {
                log::info!("Loaded high score {}", file.high_score);
                file.high_score
            }
            Err(e) => {
                log::warn!("Corrupt high score file {}: {}", self.path.display(), e);
                0
            }
        }
    }

    /// Write the record, replacing any previous file
    pub fn save(&self, high_score: u32) -> io::Result<()> {
        let json = serde_json::to_string(&HighScoreFile { high_score }).map_err(io::Error::other)?;
        fs::write(&self.path, json)?;
        log::info!("High score {} saved to {}", high_score, self.path.display());
        Ok(())
    }
}
