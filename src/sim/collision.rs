//! Collision queries against the tile grid and between entities
//!
//! All queries are pure. Boxes are axis-aligned and centered; the tile range a
//! box covers is found by floor-dividing each edge by the tile size, so a box
//! touching the grid edge also touches the (blocking) outside.

use glam::Vec2;

use super::grid::TileGrid;
use crate::consts::TILE_SIZE;

/// Axis-aligned box given by center and half extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size / 2.0,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Strict overlap; boxes that only share an edge do not touch
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }
}

/// Check whether a centered box overlaps any blocked tile
pub fn box_collides(grid: &TileGrid, center: Vec2, width: f32, height: f32) -> bool {
    let left = ((center.x - width / 2.0) / TILE_SIZE).floor() as i32;
    let right = ((center.x + width / 2.0) / TILE_SIZE).floor() as i32;
    let top = ((center.y - height / 2.0) / TILE_SIZE).floor() as i32;
    let bottom = ((center.y + height / 2.0) / TILE_SIZE).floor() as i32;

    for ty in top..=bottom {
        for tx in left..=right {
            if grid.is_blocked(tx, ty) {
                return true;
            }
        }
    }
    false
}

/// Move a box by `delta`, one axis at a time
///
/// Each axis is committed only if the box does not collide after moving along
/// that axis alone. Returns the new center and which axes were rejected, so
/// callers can kill the matching velocity component and slide along walls.
pub fn move_axis_separated(
    grid: &TileGrid,
    center: Vec2,
    delta: Vec2,
    size: Vec2,
) -> (Vec2, BVec) {
    let mut pos = center;
    let mut blocked = BVec::default();

    let try_x = Vec2::new(pos.x + delta.x, pos.y);
    if box_collides(grid, try_x, size.x, size.y) {
        blocked.x = true;
    } else {
        pos = try_x;
    }

    let try_y = Vec2::new(pos.x, pos.y + delta.y);
    if box_collides(grid, try_y, size.x, size.y) {
        blocked.y = true;
    } else {
        pos = try_y;
    }

    (pos, blocked)
}

/// Per-axis rejection flags from `move_axis_separated`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BVec {
    pub x: bool,
    pub y: bool,
}

/// Point-in-circle test without a square root
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance_squared(center) <= radius * radius
}
