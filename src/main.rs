//! Beam Barrage headless runner
//!
//! Plays one encounter at a fixed 60 Hz with a simple dodging bot and logs
//! what happened. Usage: `beam-barrage [tuning.json] [seed]`.

use std::process::ExitCode;

use glam::Vec2;

use beam_barrage::consts::FRAME_MS;
use beam_barrage::direction_deg;
use beam_barrage::render::RenderSnapshot;
use beam_barrage::sim::{GameEvent, GameState, SoulInput, TickInput, tick};
use beam_barrage::{SoundCue, Tuning};

/// Longest run before the bot gives up (ms)
const MAX_RUN_MS: f64 = 120_000.0;

/// Beams farther than this from the soul are ignored by the bot
const THREAT_RANGE: f32 = 60.0;

/// Steer away from the closest beam centerline, else drift back to the middle
fn dodge(state: &GameState) -> SoulInput {
    let soul = state.soul.pos;

    let threat = state
        .scheduler
        .live()
        .iter()
        .filter_map(|b| {
            let beam = b.beam().filter(|beam| beam.is_active())?;
            let start = b.mouth_position();
            let dir = direction_deg(beam.angle);
            let along = (soul - start).dot(dir).clamp(0.0, beam.length);
            let away = soul - (start + dir * along);
            Some(away)
        })
        .min_by(|a, b| a.length().total_cmp(&b.length()));

    let push = match threat {
        Some(away) if away.length() < THREAT_RANGE => away.normalize_or(Vec2::X),
        _ => (state.arena.center() - soul) * 0.05,
    };

    SoulInput {
        up: push.y < -0.5,
        down: push.y > 0.5,
        left: push.x < -0.5,
        right: push.x > 0.5,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Could not load tuning from {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::error!("Invalid seed: {}", e);
            return ExitCode::FAILURE;
        }
        None => 0x5EED,
    };

    log::info!("Beam Barrage (headless) starting, seed {}", seed);
    let mut state = GameState::with_tuning(seed, tuning);

    let mut patterns = 0u32;
    let mut hits = 0u32;
    let mut voiced = [0u32; 2];
    let mut peak_beams = 0usize;

    while !state.is_game_over() && state.time_ms < MAX_RUN_MS {
        let input = TickInput {
            soul: dodge(&state),
            restart: false,
        };
        tick(&mut state, &input, FRAME_MS);

        for event in state.drain_events() {
            match event {
                GameEvent::PatternStarted(kind) => {
                    patterns += 1;
                    log::debug!("t={:.0}ms pattern {}", state.time_ms, kind.as_str());
                }
                GameEvent::DamageApplied { amount, position } => {
                    hits += 1;
                    log::debug!("t={:.0}ms hit for {} at {:?}", state.time_ms, amount, position);
                }
                _ => {}
            }
        }

        for cue in state.scheduler.drain_sound_cues() {
            match cue {
                SoundCue::Charge => voiced[0] += 1,
                SoundCue::Fire => voiced[1] += 1,
            }
        }

        peak_beams = peak_beams.max(RenderSnapshot::from_state(&state).beams.len());
    }

    log::info!(
        "Run ended after {:.1}s: score {} (level {}), hp {}/{}, {} hits taken",
        state.time_ms / 1000.0,
        state.score.score,
        state.level,
        state.soul.hp,
        state.soul.max_hp,
        hits
    );
    log::info!(
        "{} patterns, {} charge / {} fire cues voiced, peak {} beams on screen",
        patterns,
        voiced[0],
        voiced[1],
        peak_beams
    );

    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page; nothing to run here
}
