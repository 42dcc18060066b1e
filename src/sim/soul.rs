//! The player's soul: movement, hp and the invulnerability window
//!
//! The soul only consumes collision verdicts. Whether a beam touched it is
//! decided by the scheduler's collision pass.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Rect;
use crate::sanitize_dt;
use crate::tuning::SoulTuning;

/// Directional input for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoulInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl SoulInput {
    /// Unnormalized movement axis (each component in -1..=1)
    pub fn axis(&self) -> Vec2 {
        let x = self.right as i32 - self.left as i32;
        let y = self.down as i32 - self.up as i32;
        Vec2::new(x as f32, y as f32)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Soul {
    pub pos: Vec2,
    pub radius: f32,
    pub hp: u32,
    pub max_hp: u32,
    pub invulnerable: bool,
    /// Remaining invulnerability (ms)
    pub invulnerable_ms: f32,
    /// Remaining flicker (ms)
    pub flash_ms: f32,
    /// Movement bounds (battle box minus clamp margin)
    bounds: Rect,
    spawn: Vec2,
    speed: f32,
    invulnerable_duration_ms: f32,
    flash_duration_ms: f32,
    flash_period_ms: f32,
}

impl Soul {
    pub fn new(battle_box: Rect, tuning: &SoulTuning) -> Self {
        let spawn = battle_box.center();
        Self {
            pos: spawn,
            radius: tuning.radius,
            hp: tuning.max_hp,
            max_hp: tuning.max_hp,
            invulnerable: false,
            invulnerable_ms: 0.0,
            flash_ms: 0.0,
            bounds: battle_box.inset(tuning.clamp_margin),
            spawn,
            speed: tuning.speed,
            invulnerable_duration_ms: tuning.invulnerable_ms,
            flash_duration_ms: tuning.flash_ms,
            flash_period_ms: tuning.flash_period_ms,
        }
    }

    /// Move from input, clamp to the box, run down the damage timers
    pub fn update(&mut self, input: &SoulInput, dt: f32) {
        let dt = sanitize_dt(dt);

        self.pos += input.axis() * self.speed * dt;
        self.pos = self.bounds.clamp(self.pos);

        if self.invulnerable {
            self.invulnerable_ms -= dt;
            if self.invulnerable_ms <= 0.0 {
                self.invulnerable_ms = 0.0;
                self.invulnerable = false;
            }
        }

        if self.flash_ms > 0.0 {
            self.flash_ms = (self.flash_ms - dt).max(0.0);
        }
    }

    /// Apply damage unless invulnerable. Returns true if hp was taken.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.invulnerable {
            return false;
        }

        self.hp = self.hp.saturating_sub(amount);
        self.invulnerable = true;
        self.invulnerable_ms = self.invulnerable_duration_ms;
        self.flash_ms = self.flash_duration_ms;
        log::debug!("Soul hit for {} ({} / {} hp)", amount, self.hp, self.max_hp);
        true
    }

    /// Flicker phase: true = draw at full opacity, false = dimmed
    pub fn renders_bright(&self) -> bool {
        if self.flash_ms <= 0.0 || self.flash_period_ms <= 0.0 {
            return true;
        }
        ((self.flash_ms / self.flash_period_ms).floor() as i64) % 2 == 0
    }

    /// Recently hit (renderer swaps to the damaged sprite)
    pub fn is_damaged_look(&self) -> bool {
        self.invulnerable
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Full hp, centered, timers cleared
    pub fn reset(&mut self) {
        self.hp = self.max_hp;
        self.pos = self.spawn;
        self.invulnerable = false;
        self.invulnerable_ms = 0.0;
        self.flash_ms = 0.0;
    }
}
