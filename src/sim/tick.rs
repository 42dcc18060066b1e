//! Per-frame simulation step
//!
//! Advances the whole encounter by one variable `dt`. Order matters: the soul
//! moves before the scheduler runs collision, so a dodge on this frame counts.

use serde::{Deserialize, Serialize};

use super::soul::SoulInput;
use super::state::{GameEvent, GamePhase, GameState};
use crate::sanitize_dt;

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Held movement keys
    pub soul: SoulInput,
    /// Start a new run (only honoured after game over)
    pub restart: bool,
}

/// Advance the encounter by `dt` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = sanitize_dt(dt);
    state.events.clear();

    if state.phase == GamePhase::GameOver {
        if input.restart {
            state.restart();
        } else {
            return;
        }
    }

    state.time_ms += dt as f64;
    state.frame += 1;

    state.soul.update(&input.soul, dt);
    state
        .scheduler
        .update(dt, &mut state.soul, &mut state.rng, &mut state.events);

    state.score.update(dt, state.soul.is_alive());
    let previous = state.level;
    state.refresh_level();
    if state.level != previous {
        log::debug!("Difficulty level {} -> {}", previous, state.level);
    }

    state.patterns.update(
        dt,
        state.level,
        &mut state.scheduler,
        &state.arena,
        &mut state.rng,
        &mut state.events,
    );

    if !state.soul.is_alive() {
        state.phase = GamePhase::GameOver;
        let record = state.score.update_high_score();
        state.events.push(GameEvent::GameOver {
            score: state.score.score,
        });
        log::info!(
            "Game over at {:.1}s: score {}{}",
            state.time_ms / 1000.0,
            state.score.score,
            if record { " (new high score)" } else { "" }
        );
    }
}
