//! Collectible flags

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::state::Body;
use crate::consts::{MARKER_BOB_AMPLITUDE, MARKER_BOB_SPEED, MARKER_SIZE};
use crate::tile_center;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marker {
    pub body: Body,
    tile: IVec2,
    collected: bool,
    /// Bobbing phase (radians), cosmetic only
    phase: f32,
}

impl Marker {
    pub fn from_tile(tile: IVec2) -> Self {
        Self {
            body: Body::new(tile_center(tile), MARKER_SIZE),
            tile,
            collected: false,
            phase: 0.0,
        }
    }

    pub fn tile(&self) -> IVec2 {
        self.tile
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Resting position, without the bob
    pub fn anchor(&self) -> Vec2 {
        tile_center(self.tile)
    }

    /// Advance the bobbing animation
    pub fn update(&mut self, dt: f32) {
        if self.collected {
            return;
        }
        self.phase += dt * MARKER_BOB_SPEED;
        self.body.pos = self.anchor() + Vec2::new(0.0, self.phase.sin() * MARKER_BOB_AMPLITUDE);
    }

    /// Mark as collected; false if it already was
    pub fn collect(&mut self) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        self.body.active = false;
        true
    }

    pub fn reset(&mut self) {
        self.collected = false;
        self.body.active = true;
        self.body.pos = self.anchor();
        self.phase = 0.0;
    }
}
