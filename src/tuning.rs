//! Encounter tuning
//!
//! Every balance number the simulation reads lives here. Defaults match
//! `crate::consts`; a JSON file can override any subset of fields.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading tuning data
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    /// Tuning file could not be read
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    /// Tuning JSON was malformed
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is outside its legal range
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Axis-aligned rectangle (x, y, w, h) in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectSpec {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Inclusive bounds the blaster spawn point is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnJitter {
    pub min: Vec2,
    pub max: Vec2,
}

impl SpawnJitter {
    /// Jitter that always yields `point` (deterministic tests)
    pub fn fixed(point: Vec2) -> Self {
        Self {
            min: point,
            max: point,
        }
    }
}

/// Blaster entry/recoil behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlasterTuning {
    pub appear_ms: f32,
    pub spin_ease_fraction: f32,
    pub entry_spin_deg: f32,
    pub mouth_offset: f32,
    pub recoil_accel: f32,
    /// Frame duration of the single appear frame
    pub appear_frame_ms: f32,
    /// Frame duration of the three mouth-opening frames
    pub open_frame_ms: f32,
    /// Frame duration of the looping fire frames
    pub fire_frame_ms: f32,
    pub spawn_jitter: SpawnJitter,
}

impl Default for BlasterTuning {
    fn default() -> Self {
        Self {
            appear_ms: APPEAR_MS,
            spin_ease_fraction: SPIN_EASE_FRACTION,
            entry_spin_deg: ENTRY_SPIN_DEG,
            mouth_offset: MOUTH_OFFSET,
            recoil_accel: RECOIL_ACCEL,
            appear_frame_ms: 200.0,
            open_frame_ms: 120.0,
            fire_frame_ms: 150.0,
            spawn_jitter: SpawnJitter {
                min: Vec2::ZERO,
                max: Vec2::new(WORLD_WIDTH, WORLD_HEIGHT),
            },
        }
    }
}

/// Beam growth, fade and width
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamTuning {
    /// Growth speed in px per second
    pub speed: f32,
    pub max_length: f32,
    pub hitbox_width: f32,
    pub fade_ms: f32,
    /// Visual width at the bottom of the pulse
    pub draw_width_base: f32,
    /// Visual width added at the top of the pulse
    pub draw_width_pulse: f32,
    /// Pulse frequency (radians per ms of beam age)
    pub pulse_rate: f32,
}

impl Default for BeamTuning {
    fn default() -> Self {
        Self {
            speed: BEAM_SPEED,
            max_length: BEAM_MAX_LENGTH,
            hitbox_width: BEAM_HITBOX_WIDTH,
            fade_ms: BEAM_FADE_MS,
            draw_width_base: 20.0,
            draw_width_pulse: 20.0,
            pulse_rate: 0.02,
        }
    }
}

/// Player soul
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SoulTuning {
    pub radius: f32,
    /// Movement speed in px per ms
    pub speed: f32,
    pub max_hp: u32,
    pub clamp_margin: f32,
    pub invulnerable_ms: f32,
    pub flash_ms: f32,
    pub flash_period_ms: f32,
}

impl Default for SoulTuning {
    fn default() -> Self {
        Self {
            radius: SOUL_RADIUS,
            speed: SOUL_SPEED,
            max_hp: SOUL_MAX_HP,
            clamp_margin: SOUL_CLAMP_MARGIN,
            invulnerable_ms: INVULNERABLE_MS,
            flash_ms: FLASH_MS,
            flash_period_ms: FLASH_PERIOD_MS,
        }
    }
}

/// Battle box and world extents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaTuning {
    pub battle_box: RectSpec,
    pub world: RectSpec,
    pub reap_margin: f32,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            battle_box: RectSpec {
                x: ARENA_X,
                y: ARENA_Y,
                w: ARENA_W,
                h: ARENA_H,
            },
            world: RectSpec {
                x: 0.0,
                y: 0.0,
                w: WORLD_WIDTH,
                h: WORLD_HEIGHT,
            },
            reap_margin: REAP_MARGIN,
        }
    }
}

/// Damage dealt by the scheduler's collision pass
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerTuning {
    pub beam_damage: u32,
}

impl Default for SchedulerTuning {
    fn default() -> Self {
        Self {
            beam_damage: BEAM_DAMAGE,
        }
    }
}

/// Pattern pacing and difficulty curve
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternTuning {
    /// How far outside the battle box the cross pattern's blasters sit
    pub edge_offset: f32,
    pub cross_wait_ms: f32,
    pub triple_wait_ms: f32,
    pub circle_wait_ms: f32,
    pub circle_count: u32,
    pub chain_interval_ms: f32,
    pub chain_count: u32,
    pub spiral_interval_ms: f32,
    pub spiral_count: u32,
    pub spiral_step_deg: f32,
    /// Score per difficulty level
    pub score_per_level: u64,
    pub base_cooldown_ms: f32,
    pub cooldown_per_level_ms: f32,
    pub max_cooldown_reduction_ms: f32,
    pub min_cooldown_ms: f32,
    pub base_beam_ms: f32,
    pub beam_per_level_ms: f32,
    pub max_beam_increase_ms: f32,
}

impl Default for PatternTuning {
    fn default() -> Self {
        Self {
            edge_offset: 50.0,
            cross_wait_ms: 1500.0,
            triple_wait_ms: 1200.0,
            circle_wait_ms: 1500.0,
            circle_count: 8,
            chain_interval_ms: 300.0,
            chain_count: 5,
            spiral_interval_ms: 200.0,
            spiral_count: 12,
            spiral_step_deg: 30.0,
            score_per_level: 1000,
            base_cooldown_ms: 1000.0,
            cooldown_per_level_ms: 50.0,
            max_cooldown_reduction_ms: 500.0,
            min_cooldown_ms: 500.0,
            base_beam_ms: 800.0,
            beam_per_level_ms: 30.0,
            max_beam_increase_ms: 400.0,
        }
    }
}

/// Sound cue throttling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioTuning {
    /// Minimum gap between two voiced cues
    pub cooldown_ms: f64,
}

impl Default for AudioTuning {
    fn default() -> Self {
        Self { cooldown_ms: 100.0 }
    }
}

/// Complete encounter tuning
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub blaster: BlasterTuning,
    pub beam: BeamTuning,
    pub soul: SoulTuning,
    pub arena: ArenaTuning,
    pub scheduler: SchedulerTuning,
    pub patterns: PatternTuning,
    pub audio: AudioTuning,
}

impl Tuning {
    /// Parse and validate tuning from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for dumping the defaults)
    pub fn to_json_pretty(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would stall timers or divide by zero
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("blaster.appear_ms", self.blaster.appear_ms),
            ("blaster.appear_frame_ms", self.blaster.appear_frame_ms),
            ("blaster.open_frame_ms", self.blaster.open_frame_ms),
            ("blaster.fire_frame_ms", self.blaster.fire_frame_ms),
            ("beam.speed", self.beam.speed),
            ("beam.max_length", self.beam.max_length),
            ("beam.hitbox_width", self.beam.hitbox_width),
            ("beam.fade_ms", self.beam.fade_ms),
            ("soul.radius", self.soul.radius),
            ("soul.flash_period_ms", self.soul.flash_period_ms),
            ("arena.battle_box.w", self.arena.battle_box.w),
            ("arena.battle_box.h", self.arena.battle_box.h),
            ("patterns.chain_interval_ms", self.patterns.chain_interval_ms),
            ("patterns.spiral_interval_ms", self.patterns.spiral_interval_ms),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                log::warn!("Rejected tuning: {} = {}", name, value);
                return Err(TuningError::Invalid(format!("{name} must be > 0, got {value}")));
            }
        }

        let fraction = self.blaster.spin_ease_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(TuningError::Invalid(format!(
                "blaster.spin_ease_fraction must be in (0, 1], got {fraction}"
            )));
        }

        let margin = self.soul.clamp_margin * 2.0;
        if margin >= self.arena.battle_box.w || margin >= self.arena.battle_box.h {
            return Err(TuningError::Invalid(
                "soul.clamp_margin leaves no room inside the battle box".into(),
            ));
        }

        let jitter = &self.blaster.spawn_jitter;
        let span = jitter.max - jitter.min;
        if !(jitter.min.is_finite() && jitter.max.is_finite() && span.is_finite()) {
            log::warn!("Rejected tuning: blaster.spawn_jitter {:?}", jitter);
            return Err(TuningError::Invalid(
                "blaster.spawn_jitter bounds and span must be finite".into(),
            ));
        }
        if jitter.min.x > jitter.max.x || jitter.min.y > jitter.max.y {
            return Err(TuningError::Invalid("blaster.spawn_jitter min exceeds max".into()));
        }

        if self.patterns.score_per_level == 0 {
            return Err(TuningError::Invalid("patterns.score_per_level must be > 0".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.soul.max_hp, 92);
        assert_eq!(tuning.beam.hitbox_width, 30.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json_str(r#"{ "soul": { "max_hp": 20 } }"#).unwrap();
        assert_eq!(tuning.soul.max_hp, 20);
        assert_eq!(tuning.soul.radius, SOUL_RADIUS);
        assert_eq!(tuning.blaster.appear_ms, APPEAR_MS);
    }

    #[test]
    fn test_round_trip_defaults() {
        let json = Tuning::default().to_json_pretty().unwrap();
        let tuning = Tuning::from_json_str(&json).unwrap();
        assert_eq!(tuning.arena.battle_box, Tuning::default().arena.battle_box);
    }

    #[test]
    fn test_scheduler_section_only_holds_damage() {
        let json = Tuning::default().to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let scheduler = value["scheduler"].as_object().unwrap();
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler["beam_damage"], 5);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_zero_fade() {
        let err = Tuning::from_json_str(r#"{ "beam": { "fade_ms": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_inverted_jitter() {
        let mut tuning = Tuning::default();
        tuning.blaster.spawn_jitter = SpawnJitter {
            min: Vec2::new(10.0, 0.0),
            max: Vec2::new(0.0, 0.0),
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_jitter() {
        // Each bound is finite but the span overflows f32
        let json = r#"{ "blaster": { "spawn_jitter": { "min": [-3e38, 0], "max": [3e38, 600] } } }"#;
        let err = Tuning::from_json_str(json).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let mut tuning = Tuning::default();
        tuning.blaster.spawn_jitter.max.x = f32::INFINITY;
        assert!(tuning.validate().is_err());
        tuning.blaster.spawn_jitter = SpawnJitter::fixed(Vec2::new(f32::NAN, 0.0));
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TuningError::Io(_)));
    }
}
