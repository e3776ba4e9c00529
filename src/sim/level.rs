//! Level descriptors
//!
//! A level arrives as already-parsed structured data (usually JSON). It is
//! validated in full before the world swaps anything in.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::grid::TileGrid;
use crate::consts::DEFAULT_TIME_LIMIT;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level grid is empty")]
    EmptyGrid,
    #[error("grid row {row} has {actual} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("unknown tile code {code} at ({x}, {y})")]
    UnknownTile { x: usize, y: usize, code: u8 },
    #[error("{what} at ({x}, {y}) lies outside the grid")]
    OutOfBounds { what: &'static str, x: i32, y: i32 },
    #[error("time limit must be positive, got {0}")]
    BadTimeLimit(f32),
}

/// Level file contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    /// Rows of tile codes (0 road, 1 wall, 2 grass, 3 border)
    pub grid: Vec<Vec<u8>>,
    pub player_spawn: [i32; 2],
    #[serde(default, rename = "enemy_spawns")]
    pub pursuer_spawns: Vec<[i32; 2]>,
    #[serde(default, rename = "flags")]
    pub markers: Vec<[i32; 2]>,
    #[serde(default = "default_time_limit")]
    pub time_limit: f32,
}

fn default_time_limit() -> f32 {
    DEFAULT_TIME_LIMIT
}

/// A descriptor that passed validation
#[derive(Debug, Clone)]
pub struct ValidLevel {
    pub grid: TileGrid,
    pub player_spawn: IVec2,
    pub pursuer_spawns: Vec<IVec2>,
    pub markers: Vec<IVec2>,
    pub time_limit: f32,
}

impl LevelDescriptor {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the descriptor and build its grid
    pub fn validate(&self) -> Result<ValidLevel, LevelError> {
        let grid = TileGrid::from_rows(&self.grid)?;

        if !(self.time_limit > 0.0) {
            return Err(LevelError::BadTimeLimit(self.time_limit));
        }

        let check = |what: &'static str, [x, y]: [i32; 2]| {
            let tile = IVec2::new(x, y);
            if grid.in_bounds(tile) {
                Ok(tile)
            } else {
                Err(LevelError::OutOfBounds { what, x, y })
            }
        };

        let player_spawn = check("player spawn", self.player_spawn)?;
        let pursuer_spawns = self
            .pursuer_spawns
            .iter()
            .map(|&s| check("pursuer spawn", s))
            .collect::<Result<Vec<_>, _>>()?;
        let markers = self
            .markers
            .iter()
            .map(|&m| check("flag", m))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ValidLevel {
            grid,
            player_spawn,
            pursuer_spawns,
            markers,
            time_limit: self.time_limit,
        })
    }
}
