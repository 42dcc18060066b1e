//! Survival score, combo and high score
//!
//! Score is time survived: one point per 10ms alive, with the fractional
//! remainder carried between frames so frame rate does not change the total.

use serde::{Deserialize, Serialize};

use crate::sanitize_dt;

/// Milliseconds alive per point
pub const MS_PER_POINT: f32 = 10.0;

/// Milliseconds alive per combo step
pub const MS_PER_COMBO: f32 = 1000.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreKeeper {
    pub score: u64,
    /// Uncredited time (ms) below one point
    carry_ms: f32,
    pub combo: u32,
    combo_ms: f32,
    pub high_score: u64,
}

impl ScoreKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `dt` of survival. A dead soul breaks the combo and earns nothing.
    pub fn update(&mut self, dt: f32, alive: bool) {
        if !alive {
            self.combo = 0;
            self.combo_ms = 0.0;
            return;
        }

        let dt = sanitize_dt(dt);

        self.carry_ms += dt;
        let points = (self.carry_ms / MS_PER_POINT).floor();
        if points >= 1.0 {
            self.score = self.score.saturating_add(points as u64);
            self.carry_ms -= points * MS_PER_POINT;
        }

        self.combo_ms += dt;
        while self.combo_ms >= MS_PER_COMBO {
            self.combo_ms -= MS_PER_COMBO;
            self.combo = self.combo.saturating_add(1);
        }
    }

    /// Record the current score if it beats the best. Returns true on a new record.
    pub fn update_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            return true;
        }
        false
    }

    /// Zero the run; the high score survives
    pub fn reset(&mut self) {
        self.score = 0;
        self.carry_ms = 0.0;
        self.combo = 0;
        self.combo_ms = 0.0;
    }
}
