//! Player input intent consumed by the tick

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Cardinal directions (screen space, y grows downward)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

pub const DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

impl Direction {
    /// Unit vector for this direction
    pub fn as_vec2(self) -> Vec2 {
        match self {
            Direction::Up => -Vec2::Y,
            Direction::Down => Vec2::Y,
            Direction::Left => -Vec2::X,
            Direction::Right => Vec2::X,
        }
    }

    /// Map a browser-style key name (arrows or WASD)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Direction::Up),
            "ArrowDown" | "s" | "S" => Some(Direction::Down),
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            _ => None,
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        match self {
            Direction::Up => 1,
            Direction::Down => 2,
            Direction::Left => 4,
            Direction::Right => 8,
        }
    }
}

/// Set of directional keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldDirections(u8);

impl HeldDirections {
    pub fn new(directions: &[Direction]) -> Self {
        let mut held = Self::default();
        for dir in directions {
            held.press(*dir);
        }
        held
    }

    pub fn press(&mut self, dir: Direction) {
        self.0 |= dir.bit();
    }

    pub fn release(&mut self, dir: Direction) {
        self.0 &= !dir.bit();
    }

    pub fn contains(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Sum of the held unit vectors; opposing keys cancel
    pub fn vector(self) -> Vec2 {
        DIRECTIONS
            .iter()
            .filter(|dir| self.contains(**dir))
            .map(|dir| dir.as_vec2())
            .sum()
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Keys held this tick; each nudges the target by the player speed
    pub held: HeldDirections,
    /// Pointer/touch position while a press is active
    pub pointer: Option<Vec2>,
}

impl TickInput {
    /// Advance the persistent target point from this tick's intent.
    ///
    /// Held keys nudge the target first, then an active pointer overrides it.
    /// The result is unclamped.
    pub fn steer(&self, target: Vec2, speed: f32) -> Vec2 {
        let nudged = target + self.held.vector() * speed;
        self.pointer.unwrap_or(nudged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key() {
        assert_eq!(Direction::from_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_key("s"), Some(Direction::Down));
        assert_eq!(Direction::from_key("a"), Some(Direction::Left));
        assert_eq!(Direction::from_key("ArrowRight"), Some(Direction::Right));
        assert_eq!(Direction::from_key("Enter"), None);
    }

    #[test]
    fn test_held_press_release() {
        let mut held = HeldDirections::default();
        assert!(held.is_empty());
        held.press(Direction::Up);
        held.press(Direction::Left);
        assert!(held.contains(Direction::Up));
        held.release(Direction::Up);
        assert!(!held.contains(Direction::Up));
        assert_eq!(held.vector(), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let held = HeldDirections::new(&[Direction::Left, Direction::Right, Direction::Down]);
        assert_eq!(held.vector(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_steer() {
        let keys = TickInput {
            held: HeldDirections::new(&[Direction::Up, Direction::Right]),
            pointer: None,
        };
        assert_eq!(keys.steer(Vec2::new(100.0, 100.0), 2.0), Vec2::new(102.0, 98.0));

        let touch = TickInput {
            held: HeldDirections::new(&[Direction::Up]),
            pointer: Some(Vec2::new(10.0, 20.0)),
        };
        assert_eq!(touch.steer(Vec2::new(100.0, 100.0), 2.0), Vec2::new(10.0, 20.0));
    }
}
