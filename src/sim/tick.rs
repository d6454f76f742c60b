//! Simulation tick
//!
//! Advances the game by one logical frame. The host decides when to call
//! it (animation callback, timer, or a test loop); nothing here assumes a
//! frame rate.

use super::input::TickInput;
use super::state::{GameEvent, GamePhase, GameState};
use crate::clamp_to_surface;

/// Advance the game state by one tick, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Nothing moves unless the game is running
    if state.phase() != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;

    // Steer the persistent target and keep it on the surface
    let steered = input.steer(state.target, state.player.speed);
    state.target = clamp_to_surface(steered, state.arena.surface(), state.player.radius);
    state.player.move_toward(state.target, &state.arena);

    let step = state.advance_ghost();
    if step.previous_mode != state.ghost.mode {
        events.push(GameEvent::GhostModeChanged {
            from: step.previous_mode,
            to: state.ghost.mode,
        });
    }
    if let Some(direction) = step.unstuck {
        events.push(GameEvent::GhostUnstuck { direction });
    }

    // At most one pickup per tick
    let hit = state.pickups.find_collision(
        state.player.pos,
        state.player.radius,
        state.settings.pickup_radius,
    );
    if let Some(pos) = hit.and_then(|index| state.pickups.remove_at(index)) {
        state.pickups_collected += 1;
        log::debug!("Pickup collected at {:?}, {} left", pos, state.pickups.len());
        events.push(GameEvent::PickupCollected { pos });
    }

    if state.is_caught() {
        state.set_phase(GamePhase::GameOver);
        log::info!(
            "Player caught at tick {} with {} pickups collected",
            state.time_ticks,
            state.pickups_collected
        );
        events.push(GameEvent::PlayerCaught);
    }

    events
}
