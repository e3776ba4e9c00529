//! Match world
//!
//! Owns the grid and every entity of a level and runs the per-tick update in a
//! fixed order: player, pursuers (smoke check first), smoke, flags.

use glam::{IVec2, Vec2};

use super::grid::TileGrid;
use super::level::{LevelDescriptor, LevelError};
use super::marker::Marker;
use super::player::Player;
use super::pursuer::Pursuer;
use super::smoke::SmokeManager;
use crate::consts::PURSUER_CONFUSED_DURATION;
use crate::tile_center;
use crate::tuning::DifficultySettings;

/// Decoded movement for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickIntent {
    /// -1/0/1 per axis
    pub direction: Vec2,
}

#[derive(Debug, Clone)]
pub struct MatchWorld {
    grid: TileGrid,
    player: Player,
    pursuers: Vec<Pursuer>,
    markers: Vec<Marker>,
    smoke: SmokeManager,
    player_spawn: IVec2,
    pursuer_spawns: Vec<IVec2>,
    time_limit: f32,
    seed: u64,
}

impl MatchWorld {
    /// An empty 1x1 world; call `load_level` before playing
    pub fn new(seed: u64) -> Self {
        Self {
            grid: TileGrid::open(1, 1),
            player: Player::new(tile_center(IVec2::ZERO)),
            pursuers: Vec::new(),
            markers: Vec::new(),
            smoke: SmokeManager::new(),
            player_spawn: IVec2::ZERO,
            pursuer_spawns: Vec::new(),
            time_limit: 0.0,
            seed,
        }
    }

    /// Replace the level; on error the current world is left as it was
    pub fn load_level(
        &mut self,
        desc: &LevelDescriptor,
        difficulty: &DifficultySettings,
    ) -> Result<(), LevelError> {
        let level = desc.validate()?;

        let count = difficulty.pursuer_count.min(level.pursuer_spawns.len());
        self.pursuer_spawns = level.pursuer_spawns[..count].to_vec();
        self.pursuers = self
            .pursuer_spawns
            .iter()
            .enumerate()
            .map(|(i, &spawn)| {
                let seed = self.seed.wrapping_mul(2654435761).wrapping_add(i as u64);
                Pursuer::new(tile_center(spawn), difficulty.pursuer_speed, seed)
            })
            .collect();

        self.grid = level.grid;
        self.player_spawn = level.player_spawn;
        self.player = Player::new(tile_center(level.player_spawn));
        self.markers = level.markers.into_iter().map(Marker::from_tile).collect();
        self.time_limit = (level.time_limit + difficulty.time_adjust).max(1.0);
        self.smoke.clear();

        log::info!(
            "level loaded: {}x{} grid, {} pursuers at speed {}, {} flags, {}s",
            self.grid.width(),
            self.grid.height(),
            self.pursuers.len(),
            difficulty.pursuer_speed,
            self.markers.len(),
            self.time_limit
        );
        Ok(())
    }

    /// Advance every entity one tick
    pub fn tick(&mut self, dt: f32, intent: &TickIntent) {
        self.player.apply_intent(intent.direction);
        self.player.tick(dt, &self.grid);

        let target = self.player.pos();
        for pursuer in &mut self.pursuers {
            let pos = pursuer.pos();
            if !pursuer.is_confused() && self.smoke.contains_point(pos.x, pos.y) {
                pursuer.confuse(PURSUER_CONFUSED_DURATION);
            }
            pursuer.tick(dt, target, &self.grid);
        }

        self.smoke.update(dt);

        for marker in &mut self.markers {
            marker.update(dt);
        }
    }

    /// Drop smoke behind the player if the cooldown allows
    pub fn trigger_smoke(&mut self) -> Option<Vec2> {
        if !self.player.trigger_smoke() {
            return None;
        }
        let origin = self.player.smoke_origin();
        self.smoke.create(origin.x, origin.y);
        Some(origin)
    }

    /// Collect every flag the player overlaps; returns how many were new
    pub fn collect_markers(&mut self) -> u32 {
        let player = &self.player.body;
        let mut collected = 0;
        for marker in &mut self.markers {
            if !marker.is_collected() && marker.body.overlaps(player) && marker.collect() {
                collected += 1;
            }
        }
        collected
    }

    /// Indices of pursuers that entered smoke and are confused right now
    pub fn confused_pursuers(&self) -> impl Iterator<Item = usize> + '_ {
        self.pursuers
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_confused())
            .map(|(i, _)| i)
    }

    pub fn check_pursuer_collision(&self) -> bool {
        if self.player.is_dead() {
            return false;
        }
        self.pursuers
            .iter()
            .any(|p| p.body.active && p.body.overlaps(&self.player.body))
    }

    pub fn respawn_player(&mut self) {
        self.player.respawn(tile_center(self.player_spawn));
    }

    pub fn respawn_pursuers(&mut self) {
        for (pursuer, &spawn) in self.pursuers.iter_mut().zip(&self.pursuer_spawns) {
            pursuer.respawn(tile_center(spawn));
        }
    }

    pub fn all_markers_collected(&self) -> bool {
        self.markers.iter().all(Marker::is_collected)
    }

    /// (collected, total)
    pub fn marker_counts(&self) -> (usize, usize) {
        let collected = self.markers.iter().filter(|m| m.is_collected()).count();
        (collected, self.markers.len())
    }

    pub fn reset_markers(&mut self) {
        for marker in &mut self.markers {
            marker.reset();
        }
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn pursuers(&self) -> &[Pursuer] {
        &self.pursuers
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn smoke(&self) -> &SmokeManager {
        &self.smoke
    }

    /// Effective time limit after the difficulty adjustment
    pub fn time_limit(&self) -> f32 {
        self.time_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::pursuer::PursuerState;
    use crate::tuning::{Difficulty, DifficultyTable};

    fn open_level() -> LevelDescriptor {
        LevelDescriptor {
            grid: vec![vec![0; 5]; 5],
            player_spawn: [1, 1],
            pursuer_spawns: vec![[4, 4]],
            markers: vec![[3, 3]],
            time_limit: 10.0,
        }
    }

    fn normal() -> DifficultySettings {
        *DifficultyTable::default().get(Difficulty::Normal)
    }

    fn loaded() -> MatchWorld {
        let mut world = MatchWorld::new(1);
        world.load_level(&open_level(), &normal()).unwrap();
        world
    }

    #[test]
    fn test_load_level() {
        let world = loaded();
        assert_eq!(world.grid().width(), 5);
        assert_eq!(world.player().pos(), Vec2::new(48.0, 48.0));
        assert_eq!(world.pursuers().len(), 1);
        assert_eq!(world.marker_counts(), (0, 1));
        assert_eq!(world.time_limit(), 10.0);
    }

    #[test]
    fn test_pursuer_count_and_time_follow_difficulty() {
        let mut desc = open_level();
        desc.pursuer_spawns = vec![[0, 4], [1, 4], [2, 4], [3, 4]];
        let table = DifficultyTable::default();

        let mut world = MatchWorld::new(1);
        world.load_level(&desc, table.get(Difficulty::Easy)).unwrap();
        assert_eq!(world.pursuers().len(), 2);
        assert_eq!(world.time_limit(), 40.0);
        assert_eq!(world.pursuers()[0].base_speed(), 2.0);

        world.load_level(&desc, table.get(Difficulty::Hard)).unwrap();
        assert_eq!(world.pursuers().len(), 4);
        assert_eq!(world.time_limit(), 1.0, "floored at one second");
    }

    #[test]
    fn test_failed_load_keeps_previous_level() {
        let mut world = loaded();
        let mut bad = open_level();
        bad.grid = Vec::new();
        assert!(world.load_level(&bad, &normal()).is_err());
        assert_eq!(world.grid().width(), 5);
        assert_eq!(world.pursuers().len(), 1);
        assert_eq!(world.marker_counts(), (0, 1));
    }

    #[test]
    fn test_collection_is_idempotent() {
        let mut world = loaded();
        world.player_mut().respawn(tile_center(IVec2::new(3, 3)));
        assert_eq!(world.collect_markers(), 1);
        assert_eq!(world.collect_markers(), 0);
        assert!(world.all_markers_collected());

        world.reset_markers();
        assert!(!world.all_markers_collected());
    }

    #[test]
    fn test_pursuer_collision() {
        let mut world = loaded();
        assert!(!world.check_pursuer_collision());
        world.player_mut().respawn(tile_center(IVec2::new(4, 4)));
        assert!(world.check_pursuer_collision());
        world.player_mut().die();
        assert!(!world.check_pursuer_collision(), "dead players cannot collide");
    }

    #[test]
    fn test_smoke_confuses_pursuer() {
        let mut world = loaded();
        // Put the player next to the pursuer, facing up, so smoke lands on it
        world.player_mut().respawn(tile_center(IVec2::new(4, 3)));
        assert!(world.trigger_smoke().is_some());
        assert!(world.trigger_smoke().is_none(), "cooldown");
        world.tick(SIM_DT, &TickIntent::default());
        assert_eq!(world.pursuers()[0].state(), PursuerState::Confused);
        assert_eq!(world.confused_pursuers().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_respawn_restores_spawns() {
        let mut world = loaded();
        for _ in 0..30 {
            world.tick(SIM_DT, &TickIntent { direction: Vec2::X });
        }
        assert_ne!(world.player().pos(), Vec2::new(48.0, 48.0));
        world.respawn_player();
        world.respawn_pursuers();
        assert_eq!(world.player().pos(), Vec2::new(48.0, 48.0));
        assert_eq!(world.pursuers()[0].pos(), Vec2::new(144.0, 144.0));
    }
}
