//! Maze Chase - a small maze chase arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze, collisions, entities, game state)
//! - `settings`: Data-driven tunables loaded from JSON
//! - `game`: Host-facing façade (input surface, lifecycle, queries)
//!
//! Rendering and input plumbing live outside this crate. A host calls
//! [`Game::advance`] once per frame and draws from [`sim::Snapshot`].

pub mod game;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Maze dimension (cells per side)
    pub const MAZE_SIZE: usize = 20;
    /// Largest maze dimension settings will accept
    pub const MAX_MAZE_SIZE: usize = 1024;
    /// Drawing surface dimensions in world units
    pub const SURFACE_WIDTH: f32 = 400.0;
    pub const SURFACE_HEIGHT: f32 = 400.0;

    /// Chance that an interior wall is knocked out after carving
    pub const DENSIFY_CHANCE: f64 = 0.15;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 10.0;
    pub const PLAYER_SPEED: f32 = 2.0;

    /// Ghost defaults
    pub const GHOST_RADIUS: f32 = 10.0;
    pub const GHOST_SPEED: f32 = 1.0;
    /// Below this distance to the player the ghost hunts
    pub const HUNT_DISTANCE: f32 = 100.0;
    /// Above this distance to the player the ghost flees
    pub const FLEE_DISTANCE: f32 = 150.0;
    /// Consecutive blocked ticks before a random nudge
    pub const STALL_THRESHOLD: u32 = 10;

    /// Pickup radius
    pub const PICKUP_RADIUS: f32 = 5.0;

    /// Extra spacing between a ghost spawn cell and any pickup
    pub const PLACEMENT_CLEARANCE: f32 = 5.0;
    /// Random cells tried before ghost placement gives up
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 1000;
}

/// Unit vector from `from` toward `to` scaled by `speed`.
///
/// Zero when the points coincide, so callers never divide by zero.
#[inline]
pub fn step_toward(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    let delta = to - from;
    let distance = delta.length();
    if distance > 0.0 {
        delta / distance * speed
    } else {
        Vec2::ZERO
    }
}

/// Clamp a point into `[margin, extent - margin]` on both axes
#[inline]
pub fn clamp_to_surface(point: Vec2, extent: Vec2, margin: f32) -> Vec2 {
    Vec2::new(
        point.x.min(extent.x - margin).max(margin),
        point.y.min(extent.y - margin).max(margin),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_toward_zero_distance() {
        let p = Vec2::new(5.0, 5.0);
        assert_eq!(step_toward(p, p, 2.0), Vec2::ZERO);
    }

    #[test]
    fn test_step_toward_scales_to_speed() {
        let step = step_toward(Vec2::ZERO, Vec2::new(30.0, 40.0), 2.0);
        assert!((step.length() - 2.0).abs() < 1e-5);
        assert!((step.x - 1.2).abs() < 1e-5);
        assert!((step.y - 1.6).abs() < 1e-5);
    }

    #[test]
    fn test_clamp_to_surface() {
        let extent = Vec2::new(400.0, 400.0);
        assert_eq!(
            clamp_to_surface(Vec2::new(-50.0, 500.0), extent, 10.0),
            Vec2::new(10.0, 390.0)
        );
        assert_eq!(
            clamp_to_surface(Vec2::new(200.0, 150.0), extent, 10.0),
            Vec2::new(200.0, 150.0)
        );
    }
}
