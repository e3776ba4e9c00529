//! Pursuer cars
//!
//! Each pursuer follows a BFS path toward the player, recomputing it on a
//! fixed interval. Smoke puts it into `Confused`: it slows down, recomputes on
//! a jittered schedule and half the time aims at a random tile near the player.

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::move_axis_separated;
use super::grid::TileGrid;
use super::pathfinding::find_path;
use super::state::Body;
use crate::consts::*;
use crate::{heading_degrees, tile_at, tile_center};

/// AI state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PursuerState {
    #[default]
    Chase,
    Confused,
    /// Reserved for an off-map respawn animation; never entered
    Respawn,
}

#[derive(Debug, Clone)]
pub struct Pursuer {
    pub body: Body,
    /// Units per tick
    pub vel: Vec2,
    base_speed: f32,
    speed: f32,
    state: PursuerState,
    path: Vec<IVec2>,
    path_index: usize,
    /// Seconds until the next path recompute
    recompute_timer: f32,
    /// Seconds of confusion left
    confused_timer: f32,
    spawn: Vec2,
    rng: Pcg32,
}

impl Pursuer {
    pub fn new(spawn: Vec2, base_speed: f32, seed: u64) -> Self {
        Self {
            body: Body::new(spawn, PURSUER_SIZE),
            vel: Vec2::ZERO,
            base_speed,
            speed: base_speed,
            state: PursuerState::Chase,
            path: Vec::new(),
            path_index: 0,
            recompute_timer: 0.0,
            confused_timer: 0.0,
            spawn,
            rng: Pcg32::seed_from_u64(seed),
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

    pub fn state(&self) -> PursuerState {
        self.state
    }

    /// Current movement speed (units per tick)
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    pub fn path(&self) -> &[IVec2] {
        &self.path
    }

    pub fn path_index(&self) -> usize {
        self.path_index
    }

    pub fn confused_remaining(&self) -> f32 {
        self.confused_timer.max(0.0)
    }

    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    pub fn is_confused(&self) -> bool {
        self.state == PursuerState::Confused
    }

    /// Advance the AI one tick toward `target` (the player's position)
    pub fn tick(&mut self, dt: f32, target: Vec2, grid: &TileGrid) {
        if !self.body.active {
            return;
        }

        if self.state == PursuerState::Confused {
            self.confused_timer -= dt;
            self.speed = self.base_speed * SMOKE_SLOW_FACTOR;
            if self.confused_timer <= 0.0 {
                self.state = PursuerState::Chase;
                self.speed = self.base_speed;
                self.confused_timer = 0.0;
                self.path.clear();
                log::debug!("pursuer at {:?} recovered", self.tile());
            }
        }

        self.recompute_timer -= dt;
        if self.recompute_timer <= 0.0 || self.path.is_empty() {
            self.recompute_path(target, grid);
            self.recompute_timer = PURSUER_PATH_RECALC_INTERVAL;
            if self.state == PursuerState::Confused {
                self.recompute_timer += self
                    .rng
                    .random_range(PURSUER_CONFUSED_JITTER_MIN..PURSUER_CONFUSED_JITTER_MAX);
            }
        }

        self.follow_path(grid);

        if self.vel != Vec2::ZERO {
            self.body.facing = heading_degrees(self.vel);
        }
    }

    fn recompute_path(&mut self, target: Vec2, grid: &TileGrid) {
        let start = self.tile();
        let mut goal = tile_at(target);

        if self.state == PursuerState::Confused && self.rng.random_bool(PURSUER_WANDER_CHANCE) {
            let spread = PURSUER_WANDER_TILES;
            goal += IVec2::new(
                self.rng.random_range(-spread..=spread),
                self.rng.random_range(-spread..=spread),
            );
        }

        self.path = find_path(start, goal, grid, PATH_SEARCH_LIMIT);
        self.path_index = 0;
        log::trace!("pursuer {start:?} -> {goal:?}: {} tiles", self.path.len());
    }

    fn follow_path(&mut self, grid: &TileGrid) {
        let Some(&next) = self.path.get(self.path_index) else {
            self.vel = Vec2::ZERO;
            return;
        };

        let mut to_target = tile_center(next) - self.body.pos;
        if to_target.length() < PURSUER_ARRIVE_DISTANCE {
            self.path_index += 1;
            match self.path.get(self.path_index) {
                Some(&after) => to_target = tile_center(after) - self.body.pos,
                None => {
                    self.vel = Vec2::ZERO;
                    return;
                }
            }
        }

        if to_target != Vec2::ZERO {
            self.vel = to_target.normalize() * self.speed;
        }

        let (pos, _) = move_axis_separated(
            grid,
            self.body.pos,
            self.vel,
            self.body.hitbox(PURSUER_HITBOX_SCALE),
        );
        self.body.pos = pos;
    }

    /// Enter `Confused` for `duration` seconds and drop the current path
    pub fn confuse(&mut self, duration: f32) {
        self.state = PursuerState::Confused;
        self.confused_timer = duration;
        self.speed = self.base_speed * SMOKE_SLOW_FACTOR;
        self.path.clear();
        self.path_index = 0;
        log::debug!("pursuer at {:?} confused for {duration:.1}s", self.tile());
    }

    pub fn respawn(&mut self, pos: Vec2) {
        self.body.pos = pos;
        self.body.active = true;
        self.vel = Vec2::ZERO;
        self.state = PursuerState::Chase;
        self.speed = self.base_speed;
        self.confused_timer = 0.0;
        self.recompute_timer = 0.0;
        self.path.clear();
        self.path_index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> TileGrid {
        TileGrid::open(10, 1)
    }

    #[test]
    fn test_chases_along_corridor() {
        let grid = corridor();
        let mut pursuer = Pursuer::new(tile_center(IVec2::new(0, 0)), 2.5, 7);
        let target = tile_center(IVec2::new(6, 0));
        pursuer.tick(SIM_DT, target, &grid);
        assert_eq!(pursuer.path().len(), 7);
        assert!(pursuer.vel.x > 0.0);
        assert_eq!(pursuer.vel.y, 0.0);
        assert!((pursuer.body.facing - 90.0).abs() < 1e-4);

        for _ in 0..200 {
            pursuer.tick(SIM_DT, target, &grid);
        }
        assert_eq!(pursuer.tile(), IVec2::new(6, 0));
        assert_eq!(pursuer.vel, Vec2::ZERO);
    }

    #[test]
    fn test_confused_speed_for_whole_duration() {
        let grid = TileGrid::open(12, 12);
        let mut pursuer = Pursuer::new(tile_center(IVec2::new(1, 1)), 2.5, 42);
        let target = tile_center(IVec2::new(10, 10));
        pursuer.confuse(1.0);
        assert_eq!(pursuer.state(), PursuerState::Confused);
        assert!((pursuer.speed() - 2.5 * SMOKE_SLOW_FACTOR).abs() < 1e-6);

        // 0.5s worth of ticks: still confused and slow
        for _ in 0..30 {
            pursuer.tick(SIM_DT, target, &grid);
            assert_eq!(pursuer.state(), PursuerState::Confused);
            assert!((pursuer.speed() - 2.5 * SMOKE_SLOW_FACTOR).abs() < 1e-6);
        }
        // Well past expiry: back to full speed
        for _ in 0..40 {
            pursuer.tick(SIM_DT, target, &grid);
        }
        assert_eq!(pursuer.state(), PursuerState::Chase);
        assert_eq!(pursuer.speed(), 2.5);
    }

    #[test]
    fn test_confuse_drops_path() {
        let grid = corridor();
        let mut pursuer = Pursuer::new(tile_center(IVec2::new(0, 0)), 2.5, 1);
        pursuer.tick(SIM_DT, tile_center(IVec2::new(8, 0)), &grid);
        assert!(!pursuer.path().is_empty());
        pursuer.confuse(PURSUER_CONFUSED_DURATION);
        assert!(pursuer.path().is_empty());
        assert_eq!(pursuer.path_index(), 0);
    }

    #[test]
    fn test_respawn_resets() {
        let grid = corridor();
        let spawn = tile_center(IVec2::new(0, 0));
        let mut pursuer = Pursuer::new(spawn, 2.5, 3);
        for _ in 0..20 {
            pursuer.tick(SIM_DT, tile_center(IVec2::new(9, 0)), &grid);
        }
        pursuer.confuse(2.0);
        pursuer.respawn(spawn);
        assert_eq!(pursuer.pos(), spawn);
        assert_eq!(pursuer.state(), PursuerState::Chase);
        assert_eq!(pursuer.speed(), 2.5);
        assert_eq!(pursuer.vel, Vec2::ZERO);
        assert!(pursuer.path().is_empty());
        assert_eq!(pursuer.confused_remaining(), 0.0);
    }

    #[test]
    fn test_same_seed_same_wander() {
        let grid = TileGrid::open(20, 20);
        let spawn = tile_center(IVec2::new(10, 10));
        let target = tile_center(IVec2::new(2, 2));
        let mut a = Pursuer::new(spawn, 2.5, 99);
        let mut b = Pursuer::new(spawn, 2.5, 99);
        a.confuse(2.0);
        b.confuse(2.0);
        for _ in 0..90 {
            a.tick(SIM_DT, target, &grid);
            b.tick(SIM_DT, target, &grid);
            assert_eq!(a.path(), b.path());
            assert_eq!(a.pos(), b.pos());
        }
    }

    #[test]
    fn test_chase_recomputes_every_interval() {
        let grid = TileGrid::open(20, 20);
        let mut pursuer = Pursuer::new(tile_center(IVec2::new(1, 1)), 2.5, 11);
        let target = tile_center(IVec2::new(18, 18));

        let mut recomputes = Vec::new();
        let mut prev = pursuer.recompute_timer;
        for tick in 0..120 {
            pursuer.tick(SIM_DT, target, &grid);
            if pursuer.recompute_timer > prev {
                assert_eq!(pursuer.recompute_timer, PURSUER_PATH_RECALC_INTERVAL);
                recomputes.push(tick);
            }
            prev = pursuer.recompute_timer;
        }

        assert_eq!(recomputes[0], 0);
        assert!(recomputes.len() >= 4, "{recomputes:?}");
        for gap in recomputes.windows(2).map(|w| w[1] - w[0]) {
            assert!((30..=31).contains(&gap), "{recomputes:?}");
        }
    }

    #[test]
    fn test_confused_recompute_jitter_and_wander_goal() {
        let grid = TileGrid::open(20, 20);
        let player_tile = IVec2::new(10, 10);
        let target = tile_center(player_tile);
        let min = PURSUER_PATH_RECALC_INTERVAL + PURSUER_CONFUSED_JITTER_MIN;
        let max = PURSUER_PATH_RECALC_INTERVAL + PURSUER_CONFUSED_JITTER_MAX;

        let mut recomputes = 0;
        let mut wandered = false;
        for seed in 0..100 {
            let mut pursuer = Pursuer::new(tile_center(IVec2::new(5, 5)), 2.5, seed);
            pursuer.confuse(10.0);
            let mut prev = pursuer.recompute_timer;
            for _ in 0..90 {
                pursuer.tick(SIM_DT, target, &grid);
                if pursuer.recompute_timer > prev {
                    recomputes += 1;
                    let timer = pursuer.recompute_timer;
                    assert!((min..=max).contains(&timer), "timer {timer}");

                    let goal = *pursuer.path().last().expect("open grid always has a path");
                    let off = (goal - player_tile).abs();
                    assert!(off.x <= PURSUER_WANDER_TILES && off.y <= PURSUER_WANDER_TILES);
                    wandered |= goal != player_tile;
                }
                prev = pursuer.recompute_timer;
            }
            assert!(pursuer.is_confused());
        }
        assert!(recomputes >= 100);
        assert!(wandered);
    }

    #[test]
    fn test_unreachable_target_stands_still() {
        let mut grid = corridor();
        grid.set(IVec2::new(3, 0), crate::sim::grid::TileKind::Wall);
        let spawn = tile_center(IVec2::new(0, 0));
        let mut pursuer = Pursuer::new(spawn, 2.5, 5);
        pursuer.tick(SIM_DT, tile_center(IVec2::new(6, 0)), &grid);
        assert!(pursuer.path().is_empty());
        assert_eq!(pursuer.vel, Vec2::ZERO);
        assert_eq!(pursuer.pos(), spawn);
    }
}
