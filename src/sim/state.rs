//! Shared simulation types
//!
//! `Body` is the spatial part every entity carries; `GameEvent` is what the
//! simulation reports to whoever presents it.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::tile_at;

/// Position, extent and orientation of an entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Center in world units
    pub pos: Vec2,
    /// Full width and height
    pub size: Vec2,
    /// Degrees, 0 = up, 90 = right
    pub facing: f32,
    pub active: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            size: Vec2::splat(size),
            facing: 0.0,
            active: true,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Box size scaled for grid collision
    #[inline]
    pub fn hitbox(&self, scale: f32) -> Vec2 {
        self.size * scale
    }

    #[inline]
    pub fn tile(&self) -> IVec2 {
        tile_at(self.pos)
    }

    pub fn overlaps(&self, other: &Body) -> bool {
        self.aabb().overlaps(&other.aabb())
    }
}

/// Discrete outcomes of a simulation tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// One or more flags picked up this tick
    MarkerCollected { count: u32 },
    /// Smoke cloud dropped at this position
    SmokeDropped { pos: Vec2 },
    /// A pursuer entered a cloud and lost track
    PursuerConfused { index: usize },
    /// Player hit a pursuer
    Crash,
    /// Player and pursuers are back at their spawns
    Respawned,
    /// All flags collected
    Victory,
    /// Out of lives or out of time
    Defeat,
    /// The countdown clock hit zero
    TimeExpired,
    /// Best score was beaten and persisted
    NewBestScore { score: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_overlap() {
        let a = Body::new(Vec2::new(48.0, 48.0), 28.0);
        let b = Body::new(Vec2::new(70.0, 48.0), 24.0);
        let c = Body::new(Vec2::new(80.0, 48.0), 24.0);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert_eq!(a.tile(), IVec2::new(1, 1));
        assert_eq!(a.hitbox(0.5), Vec2::splat(14.0));
    }
}
