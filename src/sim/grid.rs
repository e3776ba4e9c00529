//! Static tile grid
//!
//! Row-major matrix of tile kinds, immutable once a level is loaded.
//! Anything outside the grid counts as blocking.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::level::LevelError;

/// Tile classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Road,
    Wall,
    Grass,
    Border,
}

impl TileKind {
    /// Decode the small integer used in level files
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(TileKind::Road),
            1 => Some(TileKind::Wall),
            2 => Some(TileKind::Grass),
            3 => Some(TileKind::Border),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            TileKind::Road => 0,
            TileKind::Wall => 1,
            TileKind::Grass => 2,
            TileKind::Border => 3,
        }
    }

    #[inline]
    pub fn is_blocking(self) -> bool {
        matches!(self, TileKind::Wall | TileKind::Border)
    }
}

/// The level's tile matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    width: i32,
    height: i32,
    tiles: Vec<TileKind>,
}

impl TileGrid {
    /// Build a grid from rows of tile codes, rejecting empty or ragged input
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, LevelError> {
        let height = rows.len();
        if height == 0 {
            return Err(LevelError::EmptyGrid);
        }
        let width = rows[0].len();
        if width == 0 {
            return Err(LevelError::EmptyGrid);
        }

        let mut tiles = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(LevelError::RaggedRow {
                    row: y,
                    expected: width,
                    actual: row.len(),
                });
            }
            for (x, &code) in row.iter().enumerate() {
                let kind = TileKind::from_code(code).ok_or(LevelError::UnknownTile { x, y, code })?;
                tiles.push(kind);
            }
        }

        Ok(Self {
            width: width as i32,
            height: height as i32,
            tiles,
        })
    }

    /// An all-road grid, handy for tests and sandboxes
    pub fn open(width: usize, height: usize) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            tiles: vec![TileKind::Road; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, tile: IVec2) -> bool {
        tile.x >= 0 && tile.y >= 0 && tile.x < self.width && tile.y < self.height
    }

    /// Tile kind at a coordinate, `None` outside the grid
    pub fn kind(&self, tile: IVec2) -> Option<TileKind> {
        if !self.in_bounds(tile) {
            return None;
        }
        Some(self.tiles[(tile.y * self.width + tile.x) as usize])
    }

    /// Wall/border tiles and everything out of bounds block movement
    #[inline]
    pub fn is_blocked(&self, tx: i32, ty: i32) -> bool {
        self.kind(IVec2::new(tx, ty)).is_none_or(TileKind::is_blocking)
    }

    /// Overwrite a tile (level editing and tests only; no-op out of bounds)
    pub fn set(&mut self, tile: IVec2, kind: TileKind) {
        if self.in_bounds(tile) {
            self.tiles[(tile.y * self.width + tile.x) as usize] = kind;
        }
    }

    /// Rows of tile codes, the inverse of `from_rows`
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.tiles
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|k| k.code()).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_rows_classifies_tiles() {
        let grid = TileGrid::from_rows(&[vec![3, 3, 3], vec![3, 0, 2], vec![3, 1, 3]]).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert!(!grid.is_blocked(1, 1));
        assert!(!grid.is_blocked(2, 1), "grass is passable");
        assert!(grid.is_blocked(1, 2), "wall blocks");
        assert!(grid.is_blocked(0, 0), "border blocks");
        assert_eq!(grid.to_rows()[1], vec![3, 0, 2]);
    }

    #[test]
    fn test_from_rows_rejects_malformed() {
        assert!(matches!(TileGrid::from_rows(&[]), Err(LevelError::EmptyGrid)));
        assert!(matches!(TileGrid::from_rows(&[vec![]]), Err(LevelError::EmptyGrid)));
        assert!(matches!(
            TileGrid::from_rows(&[vec![0, 0], vec![0]]),
            Err(LevelError::RaggedRow { row: 1, expected: 2, actual: 1 })
        ));
        assert!(matches!(
            TileGrid::from_rows(&[vec![0, 9]]),
            Err(LevelError::UnknownTile { x: 1, y: 0, code: 9 })
        ));
    }

    proptest! {
        #[test]
        fn prop_out_of_bounds_is_blocked(
            w in 1usize..12,
            h in 1usize..12,
            x in -50i32..50,
            y in -50i32..50,
        ) {
            let grid = TileGrid::open(w, h);
            let outside = x < 0 || y < 0 || x >= w as i32 || y >= h as i32;
            prop_assert_eq!(grid.is_blocked(x, y), outside);
        }
    }
}
