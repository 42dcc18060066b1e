//! Beam Barrage - blaster attack engine for a bullet-hell boss fight
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (blasters, beams, soul, scheduling)
//! - `tuning`: Data-driven encounter balance
//! - `audio`: Sound cue policy (throttling lives outside the sim)
//! - `render`: Read-only snapshot consumed by an external renderer

pub mod audio;
pub mod render;
pub mod sim;
pub mod tuning;

pub use audio::{AudioPolicy, CooldownAudioPolicy, SoundCue};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Encounter constants (defaults for `Tuning`)
pub mod consts {
    /// Nominal frame time (60 Hz) in milliseconds
    pub const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Screen / world dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;
    /// Blasters further than this outside the world are reaped
    pub const REAP_MARGIN: f32 = 300.0;

    /// Battle box (x, y, w, h)
    pub const ARENA_X: f32 = 200.0;
    pub const ARENA_Y: f32 = 150.0;
    pub const ARENA_W: f32 = 400.0;
    pub const ARENA_H: f32 = 300.0;

    /// Blaster entry
    pub const APPEAR_MS: f32 = 800.0;
    /// Fraction of the remaining angle removed per step while appearing
    pub const SPIN_EASE_FRACTION: f32 = 1.0 / 6.0;
    /// Extra rotation a blaster starts with (degrees)
    pub const ENTRY_SPIN_DEG: f32 = 180.0;
    /// Beam origin distance in front of the blaster center
    pub const MOUTH_OFFSET: f32 = 40.0;
    /// Recoil speed gained per millisecond while firing (px/step per ms)
    pub const RECOIL_ACCEL: f32 = 0.02;

    /// Beam defaults
    pub const BEAM_SPEED: f32 = 5000.0; // px per second
    pub const BEAM_MAX_LENGTH: f32 = 3000.0;
    pub const BEAM_HITBOX_WIDTH: f32 = 30.0;
    pub const BEAM_FADE_MS: f32 = 400.0;

    /// Soul defaults
    pub const SOUL_RADIUS: f32 = 10.0;
    pub const SOUL_SPEED: f32 = 0.24; // px per ms (4 px per 60 Hz frame)
    pub const SOUL_MAX_HP: u32 = 92;
    pub const SOUL_CLAMP_MARGIN: f32 = 10.0;
    pub const INVULNERABLE_MS: f32 = 1000.0;
    pub const FLASH_MS: f32 = 200.0;
    pub const FLASH_PERIOD_MS: f32 = 50.0;

    /// Damage dealt per beam contact
    pub const BEAM_DAMAGE: u32 = 5;
}

/// Normalize an angle in degrees to (-180, 180]
#[inline]
pub fn normalize_angle_deg(angle: f32) -> f32 {
    let mut a = angle % 360.0;
    if a > 180.0 {
        a -= 360.0;
    } else if a <= -180.0 {
        a += 360.0;
    }
    a
}

/// Unit direction for an angle in degrees (screen space, Y down, 0° = +x, 90° = up)
#[inline]
pub fn direction_deg(angle: f32) -> Vec2 {
    let rad = normalize_angle_deg(angle).to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}

/// Perpendicular of a direction (rotated a quarter turn)
#[inline]
pub fn normal_of(dir: Vec2) -> Vec2 {
    Vec2::new(-dir.y, dir.x)
}

/// Distance from `p` to the closest point of segment `a`-`b`
pub fn point_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < f32::EPSILON {
        return (p - a).length(); // Degenerate segment
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).length()
}

/// Quadratic ease-out: fast start, decelerating to 1
#[inline]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Clamp a frame delta so timers never run backwards
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    // f32::max returns the non-NaN operand
    dt.max(0.0)
}
