//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Timers advance only by the `dt` passed in
//! - Seeded RNG only (one `Pcg32` per pursuer)
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod grid;
pub mod level;
pub mod marker;
pub mod pathfinding;
pub mod player;
pub mod pursuer;
pub mod session;
pub mod smoke;
pub mod state;
pub mod tick;
pub mod timer;
pub mod world;

pub use collision::{Aabb, box_collides, move_axis_separated, point_in_circle};
pub use grid::{TileGrid, TileKind};
pub use level::{LevelDescriptor, LevelError, ValidLevel};
pub use marker::Marker;
pub use pathfinding::{direction_to_tile, find_path};
pub use player::Player;
pub use pursuer::{Pursuer, PursuerState};
pub use session::Session;
pub use smoke::{Smoke, SmokeManager};
pub use state::{Body, GameEvent};
pub use tick::{MatchSummary, Round, RoundPhase, TickInput, tick};
pub use timer::CountdownTimer;
pub use world::{MatchWorld, TickIntent};
