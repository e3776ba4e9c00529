//! The player's car
//!
//! Intents accelerate the car, friction bleeds speed every tick and movement is
//! resolved one axis at a time against the grid so the car slides along walls.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::collision::move_axis_separated;
use super::grid::TileGrid;
use super::state::Body;
use crate::consts::*;
use crate::{heading_degrees, wrap_degrees};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Units per tick
    pub vel: Vec2,
    pub max_speed: f32,
    pub acceleration: f32,
    pub friction: f32,
    /// Heading the car is turning toward
    target_facing: f32,
    /// Seconds until smoke is available again
    smoke_cooldown: f32,
    dead: bool,
    spawn: Vec2,
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            body: Body::new(spawn, PLAYER_SIZE),
            vel: Vec2::ZERO,
            max_speed: PLAYER_MAX_SPEED,
            acceleration: PLAYER_ACCELERATION,
            friction: PLAYER_FRICTION,
            target_facing: 0.0,
            smoke_cooldown: 0.0,
            dead: false,
            spawn,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    #[inline]
    pub fn tile(&self) -> IVec2 {
        self.body.tile()
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    #[inline]
    pub fn facing(&self) -> f32 {
        self.body.facing
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    pub fn smoke_ready(&self) -> bool {
        self.smoke_cooldown <= 0.0
    }

    pub fn smoke_cooldown(&self) -> f32 {
        self.smoke_cooldown.max(0.0)
    }

    /// Accelerate along a direction; a zero vector only re-clamps speed
    pub fn apply_intent(&mut self, direction: Vec2) {
        if self.dead {
            return;
        }

        if direction != Vec2::ZERO {
            let dir = direction.normalize();
            self.target_facing = heading_degrees(dir);
            self.vel += dir * self.acceleration;
        }

        // Scale both components so the heading survives the clamp
        let speed = self.vel.length();
        if speed > self.max_speed {
            self.vel *= self.max_speed / speed;
        }
    }

    /// Advance one tick: cooldown, friction, movement, rotation
    pub fn tick(&mut self, dt: f32, grid: &TileGrid) {
        if self.dead {
            return;
        }

        if self.smoke_cooldown > 0.0 {
            self.smoke_cooldown -= dt;
        }

        if self.vel != Vec2::ZERO {
            self.vel *= 1.0 - self.friction;
            if self.vel.length() < PLAYER_STOP_EPSILON {
                self.vel = Vec2::ZERO;
            }
        }

        let (pos, blocked) = move_axis_separated(
            grid,
            self.body.pos,
            self.vel,
            self.body.hitbox(PLAYER_HITBOX_SCALE),
        );
        self.body.pos = pos;
        if blocked.x {
            self.vel.x = 0.0;
        }
        if blocked.y {
            self.vel.y = 0.0;
        }

        if self.speed() > PLAYER_TURN_MIN_SPEED {
            let diff = wrap_degrees(self.target_facing - self.body.facing);
            self.body.facing = wrap_degrees(self.body.facing + diff * PLAYER_TURN_RATE);
        }
    }

    /// Start the smoke cooldown if it has run out
    pub fn trigger_smoke(&mut self) -> bool {
        if self.dead || !self.smoke_ready() {
            return false;
        }
        self.smoke_cooldown = SMOKE_COOLDOWN;
        true
    }

    /// Where a new cloud goes: just behind the car along its facing
    pub fn smoke_origin(&self) -> Vec2 {
        let rad = self.body.facing.to_radians();
        self.body.pos + Vec2::new(-rad.sin(), rad.cos()) * SMOKE_DROP_OFFSET
    }

    pub fn die(&mut self) {
        self.dead = true;
        self.vel = Vec2::ZERO;
    }

    pub fn respawn(&mut self, pos: Vec2) {
        self.body.pos = pos;
        self.spawn = pos;
        self.vel = Vec2::ZERO;
        self.dead = false;
        self.body.facing = 0.0;
        self.target_facing = 0.0;
    }
}
