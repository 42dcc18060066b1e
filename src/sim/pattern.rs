//! Attack patterns and difficulty pacing
//!
//! Burst patterns (cross, triple, circle) hand the scheduler a whole script
//! at once. Continuous patterns (chain, spiral) drip one spawn per interval.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::scheduler::{Command, Scheduler};
use super::state::GameEvent;
use crate::audio::AudioPolicy;
use crate::sanitize_dt;
use crate::tuning::PatternTuning;

/// Named attack shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    /// Four blasters outside the box edges
    Cross,
    /// Three blasters at the center, 120 degrees apart
    Triple,
    /// Random cardinal shots from the center, one after another
    Chain,
    /// Eight blasters at the center, 45 degrees apart
    Circle,
    /// Center shots stepping around the clock
    Spiral,
}

impl PatternKind {
    pub const ALL: [PatternKind; 5] = [
        PatternKind::Cross,
        PatternKind::Triple,
        PatternKind::Chain,
        PatternKind::Circle,
        PatternKind::Spiral,
    ];

    /// Whole script issued in one call
    pub fn is_burst(&self) -> bool {
        matches!(self, PatternKind::Cross | PatternKind::Triple | PatternKind::Circle)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Cross => "cross",
            PatternKind::Triple => "triple",
            PatternKind::Chain => "chain",
            PatternKind::Circle => "circle",
            PatternKind::Spiral => "spiral",
        }
    }
}

/// Difficulty level for a score (1-based)
pub fn level_for_score(score: u64, tuning: &PatternTuning) -> u32 {
    let per_level = tuning.score_per_level.max(1);
    (1 + score / per_level).min(u32::MAX as u64) as u32
}

/// Idle time between patterns; shrinks with level down to a floor
pub fn attack_cooldown_ms(level: u32, tuning: &PatternTuning) -> f32 {
    let reduction = (level as f32 * tuning.cooldown_per_level_ms).min(tuning.max_cooldown_reduction_ms);
    (tuning.base_cooldown_ms - reduction).max(tuning.min_cooldown_ms)
}

/// Beam sustain for pattern spawns; grows with level up to a ceiling
pub fn beam_duration_ms(level: u32, tuning: &PatternTuning) -> f32 {
    let increase = (level as f32 * tuning.beam_per_level_ms).min(tuning.max_beam_increase_ms);
    tuning.base_beam_ms + increase
}

/// Full command script for a burst pattern (empty for continuous ones)
pub fn burst_commands(
    kind: PatternKind,
    arena: &Arena,
    tuning: &PatternTuning,
    beam_ms: f32,
) -> Vec<Command> {
    let center = arena.center();
    match kind {
        PatternKind::Cross => {
            let [top, bottom, left, right] = arena.edge_midpoints(tuning.edge_offset);
            vec![
                Command::spawn(top, 0.0, 0.0, beam_ms),
                Command::spawn(bottom, 180.0, 0.0, beam_ms),
                Command::spawn(left, 270.0, 0.0, beam_ms),
                Command::spawn(right, 90.0, 0.0, beam_ms),
                Command::wait(tuning.cross_wait_ms),
            ]
        }
        PatternKind::Triple => [0.0, 120.0, 240.0]
            .into_iter()
            .map(|angle| Command::spawn(center, angle, 0.0, beam_ms))
            .chain(std::iter::once(Command::wait(tuning.triple_wait_ms)))
            .collect(),
        PatternKind::Circle => {
            let count = tuning.circle_count.max(1);
            let step = 360.0 / count as f32;
            (0..count)
                .map(|i| Command::spawn(center, i as f32 * step, 0.0, beam_ms))
                .chain(std::iter::once(Command::wait(tuning.circle_wait_ms)))
                .collect()
        }
        PatternKind::Chain | PatternKind::Spiral => Vec::new(),
    }
}

/// Picks patterns and feeds the scheduler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternGenerator {
    /// None = idle (cooling down)
    pub current: Option<PatternKind>,
    pub cooldown_ms: f32,
    /// Time since the current pattern started / last drip spawn
    pub timer_ms: f32,
    /// Drip spawns issued by the current continuous pattern
    pub count: u32,
    tuning: PatternTuning,
}

impl PatternGenerator {
    pub fn new(tuning: &PatternTuning) -> Self {
        Self {
            current: None,
            cooldown_ms: 0.0,
            timer_ms: 0.0,
            count: 0,
            tuning: tuning.clone(),
        }
    }

    /// Start a specific pattern now (scripted encounters, tests)
    pub fn force(&mut self, kind: PatternKind) {
        self.current = Some(kind);
        self.timer_ms = 0.0;
        self.count = 0;
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn reset(&mut self) {
        self.current = None;
        self.cooldown_ms = 0.0;
        self.timer_ms = 0.0;
        self.count = 0;
    }

    /// Advance one frame at difficulty `level`
    pub fn update<A: AudioPolicy, R: Rng>(
        &mut self,
        dt: f32,
        level: u32,
        scheduler: &mut Scheduler<A>,
        arena: &Arena,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        let dt = sanitize_dt(dt);
        self.timer_ms += dt;

        match self.current {
            None => {
                if self.cooldown_ms <= 0.0 {
                    if let Some(&kind) = PatternKind::ALL.choose(rng) {
                        log::debug!("Pattern {} selected at level {}", kind.as_str(), level);
                        self.force(kind);
                        events.push(GameEvent::PatternStarted(kind));
                    }
                } else {
                    self.cooldown_ms -= dt;
                }
            }
            Some(kind) => self.execute(kind, level, scheduler, arena, rng),
        }
    }

    fn execute<A: AudioPolicy, R: Rng>(
        &mut self,
        kind: PatternKind,
        level: u32,
        scheduler: &mut Scheduler<A>,
        arena: &Arena,
        rng: &mut R,
    ) {
        let beam_ms = beam_duration_ms(level, &self.tuning);

        if kind.is_burst() {
            scheduler.sequence(burst_commands(kind, arena, &self.tuning, beam_ms));
            self.finish(level);
            return;
        }

        let (interval, total) = match kind {
            PatternKind::Chain => (self.tuning.chain_interval_ms, self.tuning.chain_count),
            _ => (self.tuning.spiral_interval_ms, self.tuning.spiral_count),
        };
        if self.timer_ms < interval {
            return;
        }
        self.timer_ms = 0.0;

        let angle = match kind {
            PatternKind::Chain => *[0.0, 90.0, 180.0, 270.0].choose(rng).unwrap_or(&0.0),
            _ => self.count as f32 * self.tuning.spiral_step_deg,
        };
        scheduler.spawn_blaster(arena.center(), angle, 0.0, beam_ms);

        self.count += 1;
        if self.count >= total {
            self.finish(level);
        }
    }

    fn finish(&mut self, level: u32) {
        self.current = None;
        self.cooldown_ms = attack_cooldown_ms(level, &self.tuning);
    }
}
