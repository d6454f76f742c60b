//! Maze Chase headless runner
//!
//! Builds a game from a seed, drives the player with a simple autopilot
//! that walks toward the nearest pickup, and prints a JSON run summary.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use glam::Vec2;
use serde::Serialize;

use maze_chase::Game;
use maze_chase::settings::Settings;
use maze_chase::sim::{GameEvent, GamePhase};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// RNG seed for the maze and ghost
    #[arg(long, default_value_t = 12345)]
    seed: u64,
    /// Ticks to simulate before stopping
    #[arg(long, default_value_t = 3600)]
    ticks: u64,
    /// JSON settings file (defaults used when absent)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Print the generated maze before running
    #[arg(long)]
    show_maze: bool,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    ticks_run: u64,
    phase: GamePhase,
    pickups_collected: u32,
    pickups_remaining: usize,
    ghost_recoveries: u32,
    ghost_mode_changes: u32,
}

/// Steer toward the closest remaining pickup
fn autopilot_target(game: &Game) -> Option<Vec2> {
    let player = game.state().player.pos;
    game.state()
        .pickups
        .points()
        .iter()
        .copied()
        .min_by(|a, b| a.distance_squared(player).total_cmp(&b.distance_squared(player)))
}

fn run(cli: &Cli) -> Result<RunSummary, Box<dyn std::error::Error>> {
    let settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let mut game = Game::start(cli.seed, settings)?;
    if cli.show_maze {
        print!("{}", game.state().arena.grid());
    }

    let mut summary = RunSummary {
        seed: cli.seed,
        ticks_run: 0,
        phase: game.phase(),
        pickups_collected: 0,
        pickups_remaining: game.state().pickups.len(),
        ghost_recoveries: 0,
        ghost_mode_changes: 0,
    };

    for _ in 0..cli.ticks {
        match autopilot_target(&game) {
            Some(target) => game.set_pointer_target(target.x, target.y, true),
            None => game.set_pointer_target(0.0, 0.0, false),
        }

        for event in game.advance() {
            match event {
                GameEvent::GhostUnstuck { .. } => summary.ghost_recoveries += 1,
                GameEvent::GhostModeChanged { .. } => summary.ghost_mode_changes += 1,
                GameEvent::PickupCollected { .. } | GameEvent::PlayerCaught => {}
            }
        }
        summary.ticks_run += 1;

        if game.is_game_over() || game.state().pickups.is_empty() {
            break;
        }
    }

    summary.phase = game.phase();
    summary.pickups_collected = game.state().pickups_collected;
    summary.pickups_remaining = game.state().pickups.len();
    Ok(summary)
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Maze Chase (headless) starting with seed {}", cli.seed);

    match run(&cli) {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                log::error!("Failed to encode summary: {err}");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            log::error!("Run failed: {err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
