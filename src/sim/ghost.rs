//! The ghost: a mode-switching pursuer
//!
//! Each tick the ghost picks a mode from its distance to the player:
//! close in and it hunts, far away and it flees, in between it drifts back
//! to its nest. The band between the two thresholds keeps it from flapping
//! between hunting and fleeing at a single boundary.
//!
//! Movement uses the same axis-separated sliding as the player. When both
//! axes stay blocked for `stall_threshold` ticks in a row the ghost takes a
//! random cardinal nudge to shake loose.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Arena;
use super::error::SimError;
use super::input::{DIRECTIONS, Direction};
use super::pickups::PickupField;
use crate::settings::Settings;
use crate::step_toward;

/// Behaviour mode, recomputed every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GhostMode {
    /// Drift back to the home cell
    #[default]
    Nest,
    /// Chase the player
    Hunt,
    /// Run from the player
    Flee,
}

/// Distance thresholds and stall tolerance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GhostBehavior {
    /// Hunt when strictly closer than this
    pub hunt_distance: f32,
    /// Flee when strictly farther than this
    pub flee_distance: f32,
    /// Blocked ticks before a random nudge
    pub stall_threshold: u32,
}

impl From<&Settings> for GhostBehavior {
    fn from(settings: &Settings) -> Self {
        Self {
            hunt_distance: settings.hunt_distance,
            flee_distance: settings.flee_distance,
            stall_threshold: settings.stall_threshold,
        }
    }
}

impl GhostMode {
    /// Mode for a given distance to the player. Both thresholds are strict,
    /// so a distance exactly on either boundary nests.
    pub fn for_distance(distance: f32, behavior: &GhostBehavior) -> Self {
        if distance < behavior.hunt_distance {
            GhostMode::Hunt
        } else if distance > behavior.flee_distance {
            GhostMode::Flee
        } else {
            GhostMode::Nest
        }
    }
}

/// What happened to the ghost during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostStep {
    /// Mode before this tick
    pub previous_mode: GhostMode,
    /// Either axis advanced
    pub moved: bool,
    /// Direction of the recovery nudge, if one fired
    pub unstuck: Option<Direction>,
}

/// The ghost entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ghost {
    pub pos: Vec2,
    pub radius: f32,
    /// World units per tick
    pub speed: f32,
    pub mode: GhostMode,
    /// Nest position, fixed at placement
    pub home: Vec2,
    /// Consecutive ticks in which neither axis moved
    pub stall_ticks: u32,
    pub behavior: GhostBehavior,
}

impl Ghost {
    pub fn new(pos: Vec2, radius: f32, speed: f32, behavior: GhostBehavior) -> Self {
        Self {
            pos,
            radius,
            speed,
            mode: GhostMode::Nest,
            home: pos,
            stall_ticks: 0,
            behavior,
        }
    }

    /// Put the ghost at `pos` and make it the new home
    pub fn place(&mut self, pos: Vec2) {
        self.pos = pos;
        self.home = pos;
        self.mode = GhostMode::Nest;
        self.stall_ticks = 0;
    }

    /// Step for the current mode (zero when there is nowhere to go)
    pub fn desired_step(&self, player_pos: Vec2) -> Vec2 {
        match self.mode {
            GhostMode::Hunt => step_toward(self.pos, player_pos, self.speed),
            GhostMode::Flee => -step_toward(self.pos, player_pos, self.speed),
            GhostMode::Nest => step_toward(self.pos, self.home, self.speed),
        }
    }

    /// Advance one tick: pick a mode, slide toward its target, recover from stalls.
    pub fn advance<R: Rng + ?Sized>(&mut self, player_pos: Vec2, arena: &Arena, rng: &mut R) -> GhostStep {
        let previous_mode = self.mode;
        self.mode = GhostMode::for_distance(self.pos.distance(player_pos), &self.behavior);
        if self.mode != previous_mode {
            log::debug!("Ghost mode {:?} -> {:?}", previous_mode, self.mode);
        }

        // A zero step still counts as moving when the ghost's own cell is clear,
        // so a ghost resting at home never trips stall recovery.
        let step = self.desired_step(player_pos);
        let result = arena.slide(self.pos, step);
        self.pos = result.pos;

        let mut unstuck = None;
        if result.moved() {
            self.stall_ticks = 0;
        } else {
            self.stall_ticks += 1;
            if self.stall_ticks >= self.behavior.stall_threshold {
                unstuck = Some(self.nudge_randomly(arena, rng));
                self.stall_ticks = 0;
            }
        }

        GhostStep {
            previous_mode,
            moved: result.moved(),
            unstuck,
        }
    }

    /// Step one `speed` in a random cardinal direction, reverting if it lands in a wall
    pub fn nudge_randomly<R: Rng + ?Sized>(&mut self, arena: &Arena, rng: &mut R) -> Direction {
        let dir = DIRECTIONS[rng.random_range(0..DIRECTIONS.len())];
        let before = self.pos;
        self.pos += dir.as_vec2() * self.speed;
        if arena.is_wall(self.pos) {
            self.pos = before;
        }
        log::trace!("Ghost stalled, nudged {:?} to {:?}", dir, self.pos);
        dir
    }
}

/// Pick a random open interior cell whose centre is clear of every pickup.
///
/// A cell is rejected when any pickup lies strictly within
/// `ghost_radius + pickup_radius + placement_clearance` of its centre.
/// Gives up after `max_placement_attempts` draws.
///
/// `GameState::reset` calls this with an empty field, since every open cell
/// holds a pickup on a full one; only walls then constrain the spawn.
pub fn find_ghost_spawn<R: Rng + ?Sized>(
    arena: &Arena,
    pickups: &PickupField,
    settings: &Settings,
    rng: &mut R,
) -> Result<Vec2, SimError> {
    let attempts = settings.max_placement_attempts;
    let size = arena.grid().size();
    if size < 3 {
        log::warn!("Ghost placement impossible in a {}x{} grid", size, size);
        return Err(SimError::PlacementExhausted { attempts: 0 });
    }

    let keep_out = settings.ghost_radius + settings.pickup_radius + settings.placement_clearance;
    for attempt in 1..=attempts {
        let col = rng.random_range(1..size - 1);
        let row = rng.random_range(1..size - 1);
        if !arena.grid().is_open(row, col) {
            continue;
        }
        let center = arena.cell_center(row, col);
        if pickups.any_within(center, keep_out) {
            continue;
        }
        log::debug!("Ghost spawn at cell ({}, {}) after {} attempts", row, col, attempt);
        return Ok(center);
    }

    log::warn!("Ghost placement exhausted {} attempts", attempts);
    Err(SimError::PlacementExhausted { attempts })
}
