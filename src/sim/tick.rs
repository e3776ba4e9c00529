//! Fixed timestep round tick
//!
//! Drives one match: countdown clock, smoke, world update, flag pickup,
//! victory and crash handling, and the respawn and victory delays.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::level::{LevelDescriptor, LevelError};
use super::pathfinding::{direction_to_tile, find_path};
use super::session::Session;
use super::state::GameEvent;
use super::timer::CountdownTimer;
use super::world::{MatchWorld, TickIntent};
use crate::consts::*;
use crate::tuning::DifficultySettings;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held direction, -1/0/1 per axis
    pub intent: Vec2,
    /// Drop smoke (one-shot)
    pub smoke: bool,
    /// Idle/demo mode - the autopilot drives
    pub idle_mode: bool,
}

/// Where the round is
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RoundPhase {
    Playing,
    /// Player crashed; seconds until respawn (or the end, on defeat)
    Respawning { delay: f32 },
    /// All flags taken; seconds until the round ends
    Victory { delay: f32 },
    Finished,
}

/// What the game-over screen shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub score: u64,
    pub best_score: u64,
    pub victory: bool,
    pub new_best: bool,
    pub markers_collected: u32,
    pub markers_total: u32,
}

/// One match in progress
#[derive(Debug)]
pub struct Round {
    pub world: MatchWorld,
    pub session: Session,
    pub clock: CountdownTimer,
    phase: RoundPhase,
}

impl Round {
    /// Wrap a world and session; the round stays `Finished` until `restart`
    pub fn new(world: MatchWorld, session: Session) -> Self {
        let clock = CountdownTimer::new(world.time_limit());
        Self {
            world,
            session,
            clock,
            phase: RoundPhase::Finished,
        }
    }

    /// Load a level and start a fresh match on it
    ///
    /// On error the previous world and session are left untouched.
    pub fn restart(
        &mut self,
        desc: &LevelDescriptor,
        difficulty: &DifficultySettings,
    ) -> Result<(), LevelError> {
        self.world.load_level(desc, difficulty)?;
        self.session.reset(self.world.markers().len() as u32);
        self.clock.restart(self.world.time_limit());
        self.phase = RoundPhase::Playing;
        Ok(())
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == RoundPhase::Finished
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            score: self.session.score(),
            best_score: self.session.best_score(),
            victory: self.session.is_victory(),
            new_best: self.session.is_new_best(),
            markers_collected: self.session.markers_collected(),
            markers_total: self.session.markers_total(),
        }
    }
}

/// Advance the round by one fixed timestep
pub fn tick(round: &mut Round, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match round.phase {
        RoundPhase::Finished => return events,
        RoundPhase::Respawning { delay } => {
            let delay = delay - dt;
            if delay > 0.0 {
                round.phase = RoundPhase::Respawning { delay };
            } else if round.session.is_defeat() {
                round.phase = RoundPhase::Finished;
            } else {
                round.world.respawn_player();
                round.world.respawn_pursuers();
                events.push(GameEvent::Respawned);
                round.phase = RoundPhase::Playing;
            }
            return events;
        }
        RoundPhase::Victory { delay } => {
            let delay = delay - dt;
            round.phase = if delay > 0.0 {
                RoundPhase::Victory { delay }
            } else {
                RoundPhase::Finished
            };
            return events;
        }
        RoundPhase::Playing => {}
    }

    // Countdown
    if round.clock.tick(dt) {
        let had_best = round.session.is_new_best();
        round.session.on_time_expired();
        events.push(GameEvent::TimeExpired);
        events.push(GameEvent::Defeat);
        push_new_best(round, had_best, &mut events);
        round.phase = RoundPhase::Finished;
        log::info!("time expired, score {}", round.session.score());
        return events;
    }

    // Idle/demo mode - autopilot drives toward the nearest flag
    let mut input = input.clone();
    if input.idle_mode {
        let (intent, smoke) = autopilot(&round.world);
        input.intent = intent;
        input.smoke = smoke;
    }

    if input.smoke {
        if let Some(pos) = round.world.trigger_smoke() {
            events.push(GameEvent::SmokeDropped { pos });
        }
    }

    let was_confused: Vec<bool> = round.world.pursuers().iter().map(|p| p.is_confused()).collect();
    round.world.tick(dt, &TickIntent {
        direction: input.intent,
    });
    for (index, pursuer) in round.world.pursuers().iter().enumerate() {
        if pursuer.is_confused() && !was_confused[index] {
            events.push(GameEvent::PursuerConfused { index });
        }
    }

    // Flags
    let collected = round.world.collect_markers();
    if collected > 0 {
        for _ in 0..collected {
            round.session.add_marker(SCORE_MARKER);
        }
        events.push(GameEvent::MarkerCollected { count: collected });
    }

    if round.world.all_markers_collected() && !round.session.is_victory() {
        let had_best = round.session.is_new_best();
        let bonus = round.session.add_time_bonus(round.clock.remaining());
        round.session.declare_victory(SCORE_COMPLETE);
        events.push(GameEvent::Victory);
        push_new_best(round, had_best, &mut events);
        round.phase = RoundPhase::Victory {
            delay: VICTORY_DELAY,
        };
        log::info!(
            "all flags collected, time bonus {bonus}, score {}",
            round.session.score()
        );
        return events;
    }

    // Crash
    if round.world.check_pursuer_collision() {
        round.world.player_mut().die();
        events.push(GameEvent::Crash);
        let had_best = round.session.is_new_best();
        if round.session.lose_life() {
            events.push(GameEvent::Defeat);
            push_new_best(round, had_best, &mut events);
            log::info!("out of lives, score {}", round.session.score());
        } else {
            log::debug!("crash, {} lives left", round.session.lives());
        }
        round.phase = RoundPhase::Respawning {
            delay: RESPAWN_DELAY,
        };
    }

    events
}

fn push_new_best(round: &Round, had_best: bool, events: &mut Vec<GameEvent>) {
    if round.session.is_new_best() && !had_best {
        events.push(GameEvent::NewBestScore {
            score: round.session.best_score(),
        });
    }
}

/// Steering for idle mode: follow a BFS path to the nearest uncollected
/// flag and drop smoke when a pursuer gets close
fn autopilot(world: &MatchWorld) -> (Vec2, bool) {
    let player = world.player();
    let start = player.tile();
    let grid = world.grid();
    let search_limit = (grid.width() * grid.height()).max(1) as usize;

    let target = world
        .markers()
        .iter()
        .filter(|m| !m.is_collected())
        .min_by_key(|m| manhattan(m.tile(), start));

    let intent = match target {
        Some(marker) => {
            let path = find_path(start, marker.tile(), grid, search_limit);
            match path.get(1).or(path.first()) {
                Some(&next) => quantize(direction_to_tile(player.pos(), next)),
                None => Vec2::ZERO,
            }
        }
        None => Vec2::ZERO,
    };

    let danger = TILE_SIZE * 3.0;
    let smoke = player.smoke_ready()
        && world
            .pursuers()
            .iter()
            .any(|p| !p.is_confused() && p.pos().distance(player.pos()) < danger);

    (intent, smoke)
}

fn manhattan(a: IVec2, b: IVec2) -> i32 {
    (a - b).abs().element_sum()
}

/// Snap a direction to -1/0/1 per axis
fn quantize(dir: Vec2) -> Vec2 {
    let snap = |v: f32| {
        if v > 0.3 {
            1.0
        } else if v < -0.3 {
            -1.0
        } else {
            0.0
        }
    };
    Vec2::new(snap(dir.x), snap(dir.y))
}
