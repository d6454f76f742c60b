//! The player-controlled runner

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Arena;
use crate::step_toward;

/// The player entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// World units per tick
    pub speed: f32,
}

impl Player {
    pub fn new(pos: Vec2, radius: f32, speed: f32) -> Self {
        Self { pos, radius, speed }
    }

    /// Step toward `target` by at most `speed`, sliding along walls.
    ///
    /// Returns true if either axis advanced. A target equal to the current
    /// position leaves the player where it is.
    pub fn move_toward(&mut self, target: Vec2, arena: &Arena) -> bool {
        let step = step_toward(self.pos, target, self.speed);
        if step == Vec2::ZERO {
            return false;
        }

        let result = arena.slide(self.pos, step);
        self.pos = result.pos;
        result.moved()
    }
}
