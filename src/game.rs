//! Host-facing game façade
//!
//! Input handlers write the current intent here between frames; the frame
//! callback calls [`Game::advance`] and then draws from [`Game::snapshot`].

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::{
    Direction, GameEvent, GamePhase, GameState, HeldDirections, SimError, Snapshot, TickInput, tick,
};

/// Game instance holding simulation state and the pending input intent
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    input: TickInput,
}

impl Game {
    /// Generate a maze, populate pickups, place the ghost and begin playing
    pub fn start(seed: u64, settings: Settings) -> Result<Self, SimError> {
        let mut state = GameState::new(seed, settings)?;
        state.set_phase(GamePhase::Playing);
        log::info!("Game started with seed {}", seed);
        Ok(Self::from_state(state))
    }

    /// Wrap an existing state (custom arenas, replays)
    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            input: TickInput::default(),
        }
    }

    /// Replace the held direction set
    pub fn set_directional_intent(&mut self, held: HeldDirections) {
        self.input.held = held;
    }

    /// Key pressed; unknown keys are ignored
    pub fn key_down(&mut self, key: &str) {
        if let Some(dir) = Direction::from_key(key) {
            self.input.held.press(dir);
        }
    }

    /// Key released; unknown keys are ignored
    pub fn key_up(&mut self, key: &str) {
        if let Some(dir) = Direction::from_key(key) {
            self.input.held.release(dir);
        }
    }

    /// Pointer/touch position in surface coordinates and whether it is pressed
    pub fn set_pointer_target(&mut self, x: f32, y: f32, active: bool) {
        self.input.pointer = active.then_some(Vec2::new(x, y));
    }

    /// Run one simulation tick with the current intent
    pub fn advance(&mut self) -> Vec<GameEvent> {
        tick(&mut self.state, &self.input)
    }

    /// Reset entities and pickups on the current maze and resume play
    pub fn restart_game(&mut self) -> Result<(), SimError> {
        log::info!("Restarting game");
        self.state.restart()
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.state.phase() == GamePhase::GameOver
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn input(&self) -> &TickInput {
        &self.input
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }
}
