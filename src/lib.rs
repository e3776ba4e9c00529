//! Rally Chase - A top-down tile-grid chase arcade game
//!
//! Core modules:
//! - `sim`: Simulation (grid collision, pathfinding, smoke, player/pursuer AI, rounds)
//! - `scene`: Scene state machine with deferred transitions
//! - `ui`: Logic-only menu model
//! - `audio`: Sound cue queue with volume and mute handling
//! - `settings` / `highscores`: Persisted user settings and best score
//! - `persistence`: JSON file helpers shared by both
//! - `tuning`: Data-driven difficulty tiers

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use highscores::{JsonScoreStore, MemoryScoreStore, ScoreStore};
pub use settings::Settings;
pub use tuning::{Difficulty, DifficultySettings, DifficultyTable};

use glam::{IVec2, Vec2};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the headless runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Side length of a square tile in world units
    pub const TILE_SIZE: f32 = 32.0;

    /// Player car
    pub const PLAYER_SIZE: f32 = 28.0;
    /// Units per tick
    pub const PLAYER_MAX_SPEED: f32 = 4.0;
    pub const PLAYER_ACCELERATION: f32 = 0.3;
    /// Fraction of velocity lost per tick
    pub const PLAYER_FRICTION: f32 = 0.1;
    /// Below this speed the car stops dead
    pub const PLAYER_STOP_EPSILON: f32 = 0.1;
    /// Facing only turns while faster than this
    pub const PLAYER_TURN_MIN_SPEED: f32 = 0.5;
    /// Fraction of the remaining angle covered per tick
    pub const PLAYER_TURN_RATE: f32 = 0.3;
    /// Collision box scale (sprite art tolerance)
    pub const PLAYER_HITBOX_SCALE: f32 = 0.8;
    pub const INITIAL_LIVES: u32 = 3;

    /// Smoke screen
    pub const SMOKE_DURATION: f32 = 2.5;
    pub const SMOKE_COOLDOWN: f32 = 4.0;
    pub const SMOKE_RADIUS: f32 = 48.0;
    pub const SMOKE_SLOW_FACTOR: f32 = 0.3;
    /// Distance behind the car where a new cloud appears
    pub const SMOKE_DROP_OFFSET: f32 = 20.0;
    /// Opacity starts fading at this fraction of the lifetime
    pub const SMOKE_FADE_START: f32 = 0.7;

    /// Pursuers
    pub const PURSUER_SIZE: f32 = 28.0;
    pub const PURSUER_SPEED: f32 = 2.5;
    pub const PURSUER_HITBOX_SCALE: f32 = 0.7;
    pub const PURSUER_CONFUSED_DURATION: f32 = 2.0;
    pub const PURSUER_PATH_RECALC_INTERVAL: f32 = 0.5;
    /// Extra recompute delay while confused, uniform in [min, max)
    pub const PURSUER_CONFUSED_JITTER_MIN: f32 = 0.5;
    pub const PURSUER_CONFUSED_JITTER_MAX: f32 = 1.0;
    /// Chance per recompute that a confused pursuer wanders off target
    pub const PURSUER_WANDER_CHANCE: f64 = 0.5;
    /// Wander offset range in tiles, per axis
    pub const PURSUER_WANDER_TILES: i32 = 3;
    /// Distance from a tile center that counts as arrived
    pub const PURSUER_ARRIVE_DISTANCE: f32 = 4.0;
    /// Maximum path length (tiles) searched per recompute
    pub const PATH_SEARCH_LIMIT: usize = 50;

    /// Flags
    pub const MARKER_SIZE: f32 = 24.0;
    pub const MARKER_BOB_SPEED: f32 = 3.0;
    pub const MARKER_BOB_AMPLITUDE: f32 = 3.0;

    /// Scoring
    pub const SCORE_MARKER: u64 = 100;
    pub const SCORE_COMPLETE: u64 = 500;
    /// Points per whole second left on the clock
    pub const TIME_BONUS_RATE: u64 = 5;

    /// Round pacing
    pub const DEFAULT_TIME_LIMIT: f32 = 120.0;
    pub const RESPAWN_DELAY: f32 = 1.5;
    pub const VICTORY_DELAY: f32 = 2.0;
}

/// Wrap an angle in degrees to [-180, 180)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

/// Heading in degrees for a direction vector, 0 = up, 90 = right
#[inline]
pub fn heading_degrees(dir: Vec2) -> f32 {
    dir.y.atan2(dir.x).to_degrees() + 90.0
}

/// Tile coordinate containing a world position
#[inline]
pub fn tile_at(pos: Vec2) -> IVec2 {
    let t = (pos / consts::TILE_SIZE).floor();
    IVec2::new(t.x as i32, t.y as i32)
}

/// World position of a tile's center
#[inline]
pub fn tile_center(tile: IVec2) -> Vec2 {
    tile.as_vec2() * consts::TILE_SIZE + Vec2::splat(consts::TILE_SIZE / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(190.0), -170.0);
        assert_eq!(wrap_degrees(-190.0), 170.0);
        assert_eq!(wrap_degrees(45.0), 45.0);
        assert_eq!(wrap_degrees(180.0), -180.0);
    }

    #[test]
    fn test_heading_degrees() {
        assert!((heading_degrees(Vec2::new(0.0, -1.0)) - 0.0).abs() < 1e-4);
        assert!((heading_degrees(Vec2::new(1.0, 0.0)) - 90.0).abs() < 1e-4);
        assert!((heading_degrees(Vec2::new(0.0, 1.0)) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_tile_helpers() {
        assert_eq!(tile_at(Vec2::new(48.0, 80.0)), IVec2::new(1, 2));
        assert_eq!(tile_at(Vec2::new(-1.0, 5.0)), IVec2::new(-1, 0));
        assert_eq!(tile_center(IVec2::new(1, 1)), Vec2::new(48.0, 48.0));
    }
}
