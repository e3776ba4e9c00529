//! Best score persistence
//!
//! The simulation only ever asks for the stored best and writes a new one
//! when it is strictly beaten. Where it lives is up to the store.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::persistence::{PersistError, load_json, save_json};

/// Backing store for the best score
pub trait ScoreStore {
    /// Stored best, 0 if nothing was saved yet
    fn load(&self) -> u64;
    fn save(&mut self, best: u64) -> Result<(), PersistError>;
}

/// In-memory store for tests and sandboxes
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    pub best: u64,
    /// Number of successful saves
    pub writes: u32,
}

impl MemoryScoreStore {
    pub fn with_best(best: u64) -> Self {
        Self { best, writes: 0 }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u64 {
        self.best
    }

    fn save(&mut self, best: u64) -> Result<(), PersistError> {
        self.best = best;
        self.writes += 1;
        Ok(())
    }
}

/// On-disk record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct BestScoreFile {
    high_score: u64,
}

/// JSON file store (`{"high_score": N}`)
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonScoreStore {
    fn load(&self) -> u64 {
        match load_json::<BestScoreFile>(&self.path) {
            Ok(Some(file)) => {
                log::info!("Loaded best score {}", file.high_score);
                file.high_score
            }
            Ok(None) => 0,
            Err(err) => {
                log::warn!("Ignoring unreadable best score: {err}");
                0
            }
        }
    }

    fn save(&mut self, best: u64) -> Result<(), PersistError> {
        save_json(&self.path, &BestScoreFile { high_score: best })?;
        log::info!("Best score saved ({best})");
        Ok(())
    }
}
