//! Game state and frame events
//!
//! Everything one encounter needs lives in `GameState`. A seed plus the
//! same input sequence always replays the same run.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::blaster::BlasterId;
use super::pattern::{PatternGenerator, PatternKind, level_for_score};
use super::scheduler::Scheduler;
use super::score::ScoreKeeper;
use super::soul::Soul;
use crate::audio::CooldownAudioPolicy;
use crate::tuning::Tuning;

/// Current phase of the encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Soul alive, patterns running
    Playing,
    /// Soul out of hp, waiting for restart
    GameOver,
}

/// Something the host may react to (sound, particles, HUD)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A blaster materialized and starts its entrance
    BlasterCharged { id: BlasterId, target: Vec2 },
    /// A blaster reached its resting point and starts opening
    BlasterOpened { id: BlasterId, pos: Vec2 },
    /// A blaster opened and its beam started
    BlasterFired { id: BlasterId, angle: f32 },
    /// The soul lost hp
    DamageApplied { amount: u32, position: Vec2 },
    /// The generator picked a new pattern
    PatternStarted(PatternKind),
    /// The soul ran out of hp
    GameOver { score: u64 },
    /// A fresh run began
    Restarted,
}

#[derive(Debug)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub arena: Arena,
    pub soul: Soul,
    pub scheduler: Scheduler<CooldownAudioPolicy>,
    pub patterns: PatternGenerator,
    pub score: ScoreKeeper,
    /// Difficulty level handed to the pattern generator (1-based)
    pub level: u32,
    pub phase: GamePhase,
    /// Events from the last tick (cleared at the start of each tick)
    pub events: Vec<GameEvent>,
    /// Simulation time (ms)
    pub time_ms: f64,
    /// Ticks since the run began
    pub frame: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new encounter with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let arena = Arena::new(&tuning.arena);
        let soul = Soul::new(arena.battle_box, &tuning.soul);
        let audio = CooldownAudioPolicy::new(&tuning.audio);
        let scheduler = Scheduler::new(&tuning, &arena, audio);
        let patterns = PatternGenerator::new(&tuning.patterns);

        Self {
            seed,
            arena,
            soul,
            scheduler,
            patterns,
            score: ScoreKeeper::new(),
            level: 1,
            phase: GamePhase::Playing,
            events: Vec::new(),
            time_ms: 0.0,
            frame: 0,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        }
    }

    /// Back to a fresh run in one step: soul, score, patterns and every
    /// queued or live blaster. The high score and RNG stream carry on.
    pub fn restart(&mut self) {
        self.soul.reset();
        self.score.reset();
        self.patterns.reset();
        self.scheduler.clear();
        self.level = 1;
        self.phase = GamePhase::Playing;
        self.frame = 0;
        self.events.push(GameEvent::Restarted);
        log::info!("Encounter restarted (high score {})", self.score.high_score);
    }

    /// Recompute the difficulty level from the score
    pub fn refresh_level(&mut self) {
        self.level = level_for_score(self.score.score, &self.tuning.patterns);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take this tick's events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
