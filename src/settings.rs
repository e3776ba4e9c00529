//! Game settings and preferences
//!
//! Persisted as JSON next to the best score. A missing or corrupt file is
//! never fatal: the defaults are used instead.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::{PersistError, load_json, save_json};
use crate::tuning::Difficulty;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty tier used for the next match
    pub difficulty: Difficulty,

    // === Audio ===
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Display ===
    pub fullscreen: bool,
    pub vsync: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            music_volume: 0.7,
            sfx_volume: 0.8,
            fullscreen: false,
            vsync: true,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match load_json::<Settings>(path) {
            Ok(Some(mut settings)) => {
                settings.clamp_volumes();
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(err) => {
                log::warn!("Using default settings: {err}");
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save_to(&self, path: &Path) -> Result<(), PersistError> {
        save_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Keep volumes inside 0.0 - 1.0
    pub fn clamp_volumes(&mut self) {
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.difficulty, Difficulty::Normal);
        assert_eq!(s.music_volume, 0.7);
        assert_eq!(s.sfx_volume, 0.8);
        assert!(!s.fullscreen);
        assert!(s.vsync);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let settings = Settings {
            difficulty: Difficulty::Hard,
            music_volume: 0.2,
            fullscreen: true,
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn test_corrupt_or_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        std::fs::write(&path, "[1, 2").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());

        // Missing keys take their defaults, out-of-range volumes are clamped
        std::fs::write(&path, r#"{"difficulty": "easy", "sfx_volume": 3.0}"#).unwrap();
        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.difficulty, Difficulty::Easy);
        assert_eq!(loaded.sfx_volume, 1.0);
        assert_eq!(loaded.music_volume, 0.7);
    }
}
