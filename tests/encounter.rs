//! End-to-end encounter runs through the public API

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use beam_barrage::Tuning;
use beam_barrage::audio::SilentAudio;
use beam_barrage::consts::FRAME_MS;
use beam_barrage::render::{RenderSnapshot, beam_vertices};
use beam_barrage::sim::{
    Arena, GameEvent, GamePhase, GameState, PatternKind, Scheduler, Soul, SoulInput, TickInput,
    burst_commands, tick,
};

fn run(state: &mut GameState, input: &TickInput, frames: usize) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..frames {
        tick(state, input, FRAME_MS);
        events.extend(state.drain_events());
    }
    events
}

/// Scheduler and soul without the pattern generator
struct Scripted {
    scheduler: Scheduler<SilentAudio>,
    soul: Soul,
    arena: Arena,
    tuning: Tuning,
    rng: Pcg32,
}

impl Scripted {
    fn new() -> Self {
        let tuning = Tuning::default();
        let arena = Arena::new(&tuning.arena);
        Self {
            scheduler: Scheduler::new(&tuning, &arena, SilentAudio),
            soul: Soul::new(arena.battle_box, &tuning.soul),
            arena,
            tuning,
            rng: Pcg32::seed_from_u64(11),
        }
    }

    fn run(&mut self, input: &SoulInput, frames: usize) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..frames {
            self.soul.update(input, FRAME_MS);
            self.scheduler
                .update(FRAME_MS, &mut self.soul, &mut self.rng, &mut events);
        }
        events
    }
}

fn count_hits(events: &[GameEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, GameEvent::DamageApplied { .. }))
        .count()
}

#[test]
fn idle_soul_eventually_dies_and_restarts() {
    let mut state = GameState::new(2024);
    let events = run(&mut state, &TickInput::default(), 60 * 600);

    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.soul.hp, 0);
    let final_score = state.score.score;
    assert!(final_score > 0);
    assert!(events.contains(&GameEvent::GameOver { score: final_score }));
    assert!(events.iter().any(|e| matches!(e, GameEvent::PatternStarted(_))));

    // 92 hp at 5 per hit
    assert_eq!(count_hits(&events), 19);

    let restart = TickInput {
        restart: true,
        ..Default::default()
    };
    tick(&mut state, &restart, FRAME_MS);
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.soul.hp, state.soul.max_hp);
    assert_eq!(state.score.high_score, final_score);
    assert!(state.scheduler.live().is_empty());
}

#[test]
fn hits_are_spaced_by_invulnerability() {
    let mut state = GameState::new(77);
    let mut last_hit: Option<f64> = None;
    for _ in 0..60 * 120 {
        tick(&mut state, &TickInput::default(), FRAME_MS);
        for event in state.drain_events() {
            if matches!(event, GameEvent::DamageApplied { .. }) {
                if let Some(prev) = last_hit {
                    assert!(state.time_ms - prev >= 1000.0 - 1e-3);
                }
                last_hit = Some(state.time_ms);
            }
        }
        if state.phase == GamePhase::GameOver {
            break;
        }
    }
    assert!(last_hit.is_some());
}

#[test]
fn cross_pattern_frames_the_box() {
    let mut s = Scripted::new();
    let commands = burst_commands(PatternKind::Cross, &s.arena, &s.tuning.patterns, 800.0);
    s.scheduler.sequence(commands);

    let events = s.run(&SoulInput::default(), 60 * 4);
    let fired = events
        .iter()
        .filter(|e| matches!(e, GameEvent::BlasterFired { .. }))
        .count();
    assert_eq!(fired, 4);
    // All four beams run outside the box, the centered soul is never touched
    assert_eq!(count_hits(&events), 0);
    assert!(s.scheduler.is_idle());
}

#[test]
fn triple_pattern_hits_centered_soul_once() {
    let mut s = Scripted::new();
    let commands = burst_commands(PatternKind::Triple, &s.arena, &s.tuning.patterns, 800.0);
    s.scheduler.sequence(commands);

    let events = s.run(&SoulInput::default(), 60 * 4);
    // Recoil drags each mouth back across the center; invulnerability
    // outlasts the overlap of the three beams
    assert_eq!(count_hits(&events), 1);
    assert_eq!(s.soul.hp, 87);
}

#[test]
fn dodging_escapes_a_beam_through_the_soul() {
    let down_through_soul = |s: &mut Scripted| {
        s.scheduler
            .spawn_blaster(Vec2::new(400.0, 100.0), 270.0, 0.0, 600.0);
    };

    let mut idle = Scripted::new();
    down_through_soul(&mut idle);
    let events = idle.run(&SoulInput::default(), 60 * 3);
    assert_eq!(count_hits(&events), 1);

    let mut dodger = Scripted::new();
    down_through_soul(&mut dodger);
    let right = SoulInput {
        right: true,
        ..Default::default()
    };
    let events = dodger.run(&right, 60 * 3);
    assert_eq!(count_hits(&events), 0);
    assert_eq!(dodger.soul.hp, dodger.soul.max_hp);
    assert_eq!(dodger.soul.pos.x, 590.0);
}

#[test]
fn snapshot_tracks_live_beams() {
    let mut state = GameState::new(5);
    let mut saw_beam = false;
    for _ in 0..60 * 10 {
        tick(&mut state, &TickInput::default(), FRAME_MS);
        let snap = RenderSnapshot::from_state(&state);
        assert_eq!(snap.blasters.len(), state.scheduler.live().len());
        assert!(snap.beams.len() <= snap.blasters.len());
        assert_eq!(beam_vertices(&snap.beams).len(), snap.beams.len() * 6);
        assert!(snap.beams.iter().all(|b| b.opacity > 0.0 && b.opacity <= 1.0));
        saw_beam |= !snap.beams.is_empty();
        if state.phase == GamePhase::GameOver {
            break;
        }
    }
    assert!(saw_beam);
}
