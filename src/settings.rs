//! Game settings and preferences
//!
//! Persisted as JSON, separately from the high score.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the high score lives
    pub high_score_path: PathBuf,
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,

    // === Visual Effects ===
    /// Ball trails (sampling always runs, this only skips drawing)
    pub trails: bool,
    /// Slow-ball pickups during play
    pub power_ups: bool,

    // === Accessibility ===
    /// Skip cross-fades; overlays appear at full strength at once
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            high_score_path: PathBuf::from("highscore.json"),
            seed: None,
            trails: true,
            power_ups: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                return Self::default();
            }
            Err(e) => {
                log::warn!("Failed to read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
