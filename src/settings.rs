//! Game settings and tuning
//!
//! Every gameplay constant is a field here so hosts can rebalance the game
//! from a JSON file without recompiling. Missing keys keep their defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Maze ===
    /// Cells per side of the square maze
    pub maze_size: usize,
    /// Chance (0.0 - 1.0) that an interior cell is opened after carving
    pub densify_chance: f64,

    // === Surface ===
    /// Width of the drawing surface in world units
    pub surface_width: f32,
    /// Height of the drawing surface in world units
    pub surface_height: f32,

    // === Player ===
    pub player_radius: f32,
    /// World units per tick
    pub player_speed: f32,

    // === Ghost ===
    pub ghost_radius: f32,
    /// World units per tick
    pub ghost_speed: f32,
    /// Hunt when strictly closer than this
    pub hunt_distance: f32,
    /// Flee when strictly farther than this
    pub flee_distance: f32,
    /// Blocked ticks before a random nudge
    pub stall_threshold: u32,

    // === Pickups ===
    pub pickup_radius: f32,

    // === Placement ===
    /// Extra gap between the ghost spawn and any pickup
    pub placement_clearance: f32,
    /// Random cells tried before placement fails
    pub max_placement_attempts: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            maze_size: MAZE_SIZE,
            densify_chance: DENSIFY_CHANCE,

            surface_width: SURFACE_WIDTH,
            surface_height: SURFACE_HEIGHT,

            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,

            ghost_radius: GHOST_RADIUS,
            ghost_speed: GHOST_SPEED,
            hunt_distance: HUNT_DISTANCE,
            flee_distance: FLEE_DISTANCE,
            stall_threshold: STALL_THRESHOLD,

            pickup_radius: PICKUP_RADIUS,

            placement_clearance: PLACEMENT_CLEARANCE,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |msg: &str| Err(SettingsError::Invalid(msg.to_string()));

        if !(3..=MAX_MAZE_SIZE).contains(&self.maze_size) {
            return invalid("maze_size must be within 3..=1024");
        }
        if !(0.0..=1.0).contains(&self.densify_chance) {
            return invalid("densify_chance must be within 0.0..=1.0");
        }
        let finite = [
            self.surface_width,
            self.surface_height,
            self.player_radius,
            self.player_speed,
            self.ghost_radius,
            self.ghost_speed,
            self.hunt_distance,
            self.flee_distance,
            self.pickup_radius,
            self.placement_clearance,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return invalid("distances, radii and speeds must be finite");
        }
        if !(self.surface_width > 0.0 && self.surface_height > 0.0) {
            return invalid("surface dimensions must be positive");
        }
        let positive = [
            self.player_radius,
            self.player_speed,
            self.ghost_radius,
            self.ghost_speed,
            self.pickup_radius,
        ];
        if positive.iter().any(|v| !(*v > 0.0)) {
            return invalid("radii and speeds must be positive");
        }
        if self.placement_clearance < 0.0 {
            return invalid("placement_clearance must not be negative");
        }
        if self.hunt_distance > self.flee_distance {
            return invalid("hunt_distance must not exceed flee_distance");
        }
        if self.stall_threshold == 0 {
            return invalid("stall_threshold must be at least 1");
        }
        if self.max_placement_attempts == 0 {
            return invalid("max_placement_attempts must be at least 1");
        }
        Ok(())
    }

    /// Surface extent as a vector
    pub fn surface(&self) -> Vec2 {
        Vec2::new(self.surface_width, self.surface_height)
    }

    /// World size of one grid cell on each axis
    pub fn cell_size(&self) -> Vec2 {
        self.surface() / self.maze_size as f32
    }

    /// Centre of the drawing surface (player spawn)
    pub fn surface_center(&self) -> Vec2 {
        self.surface() / 2.0
    }
}
