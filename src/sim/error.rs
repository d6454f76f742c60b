//! Simulation errors

use crate::settings::SettingsError;

/// Failures while building or resetting a game
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// No open, pickup-free cell was found for the ghost
    #[error("ghost placement failed after {attempts} attempts")]
    PlacementExhausted { attempts: u32 },
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
