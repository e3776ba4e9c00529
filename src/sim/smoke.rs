//! Smoke screens dropped by the player
//!
//! A cloud is a circle that lives for a fixed duration. Pursuers whose center
//! sits inside an active cloud get confused.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::point_in_circle;
use crate::consts::{SMOKE_DURATION, SMOKE_FADE_START, SMOKE_RADIUS};

/// A single smoke cloud
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Smoke {
    pub pos: Vec2,
    pub radius: f32,
    pub elapsed: f32,
    pub duration: f32,
}

impl Smoke {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: SMOKE_RADIUS,
            elapsed: 0.0,
            duration: SMOKE_DURATION,
        }
    }

    /// Lifetime fraction in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }

    /// Opacity for the renderer: 1.0, then a linear ramp to 0 over the last 30%
    pub fn opacity(&self) -> f32 {
        let p = self.progress();
        if p > SMOKE_FADE_START {
            1.0 - (p - SMOKE_FADE_START) / (1.0 - SMOKE_FADE_START)
        } else {
            1.0
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.elapsed < self.duration
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point_in_circle(point, self.pos, self.radius)
    }
}

/// Owns every live smoke cloud
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SmokeManager {
    clouds: Vec<Smoke>,
}

impl SmokeManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop a new cloud at a world position
    pub fn create(&mut self, x: f32, y: f32) -> &Smoke {
        self.clouds.push(Smoke::new(Vec2::new(x, y)));
        log::debug!("smoke dropped at ({x:.1}, {y:.1}), {} active", self.clouds.len());
        &self.clouds[self.clouds.len() - 1]
    }

    /// Age every cloud and evict the expired ones
    pub fn update(&mut self, dt: f32) {
        for cloud in &mut self.clouds {
            cloud.elapsed += dt;
        }
        self.clouds.retain(Smoke::is_active);
    }

    /// True if any active cloud covers the point
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        let point = Vec2::new(x, y);
        self.clouds
            .iter()
            .any(|cloud| cloud.is_active() && cloud.contains_point(point))
    }

    pub fn clear(&mut self) {
        self.clouds.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Smoke> {
        self.clouds.iter()
    }

    pub fn len(&self) -> usize {
        self.clouds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clouds.is_empty()
    }
}
