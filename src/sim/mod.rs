//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to `tick` per logical frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (row-major grid scans)
//! - No rendering or platform dependencies

pub mod collision;
pub mod error;
pub mod ghost;
pub mod input;
pub mod maze;
pub mod pickups;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{Arena, AxisMove, Rect};
pub use error::SimError;
pub use ghost::{Ghost, GhostBehavior, GhostMode, GhostStep, find_ghost_spawn};
pub use input::{DIRECTIONS, Direction, HeldDirections, TickInput};
pub use maze::{Cell, Grid, carve, densify, generate_maze};
pub use pickups::PickupField;
pub use player::Player;
pub use state::{
    EntityView, GameEvent, GamePhase, GameState, Rgb, Snapshot, GHOST_COLOR, PICKUP_COLOR,
    PLAYER_COLOR, WALL_COLOR,
};
pub use tick::tick;
