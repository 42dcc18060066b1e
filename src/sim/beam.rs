//! Beam growth, fade and quad geometry
//!
//! A beam is an oriented rectangle anchored at the firing blaster's mouth.
//! Its origin moves with the blaster, so the quad is rebuilt from the
//! current mouth position on every query instead of being cached.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::BeamTuning;
use crate::{direction_deg, normal_of, sanitize_dt};

/// Four corners of a beam rectangle
///
/// Corner order: `origin + n*hw`, `origin - n*hw`, then the far ends of
/// those two. Walking 0→1→2→3 traces the rectangle with a consistent winding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamQuad {
    pub corners: [Vec2; 4],
}

impl BeamQuad {
    pub fn new(origin: Vec2, angle_deg: f32, length: f32, width: f32) -> Self {
        let dir = direction_deg(angle_deg);
        let normal = normal_of(dir);
        let half_w = width * 0.5;

        let p1 = origin + normal * half_w;
        let p2 = origin - normal * half_w;
        let p3 = p2 + dir * length;
        let p4 = p1 + dir * length;

        Self {
            corners: [p1, p2, p3, p4],
        }
    }

    /// Edges as (start, end) pairs in winding order
    pub fn edges(&self) -> [(Vec2, Vec2); 4] {
        let c = &self.corners;
        [(c[0], c[1]), (c[1], c[2]), (c[2], c[3]), (c[3], c[0])]
    }

    /// Twice the signed area (shoelace)
    pub fn signed_area2(&self) -> f32 {
        self.edges()
            .iter()
            .map(|(a, b)| a.x * b.y - b.x * a.y)
            .sum()
    }

    pub fn is_finite(&self) -> bool {
        self.corners.iter().all(|c| c.is_finite())
    }

    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            corners: self.corners.map(|c| c + offset),
        }
    }
}

/// A damaging ray fired by a blaster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beam {
    /// Firing angle (degrees), fixed at creation
    pub angle: f32,
    pub length: f32,
    pub max_length: f32,
    /// Growth speed in px per second
    pub speed: f32,
    /// Width used by collision only
    pub hitbox_width: f32,
    /// Width used by rendering only (pulses)
    pub draw_width: f32,
    pub age_ms: f32,
    pub sustain_ms: f32,
    pub fade_ms: f32,
    /// 1.0 while sustained, linear fade to 0.0 afterwards
    pub opacity: f32,
    draw_width_base: f32,
    draw_width_pulse: f32,
    pulse_rate: f32,
}

impl Beam {
    pub fn new(angle: f32, sustain_ms: f32, tuning: &BeamTuning) -> Self {
        Self {
            angle,
            length: 0.0,
            max_length: tuning.max_length,
            speed: tuning.speed,
            hitbox_width: tuning.hitbox_width,
            draw_width: tuning.draw_width_base,
            age_ms: 0.0,
            sustain_ms: sustain_ms.max(0.0),
            fade_ms: tuning.fade_ms,
            opacity: 1.0,
            draw_width_base: tuning.draw_width_base,
            draw_width_pulse: tuning.draw_width_pulse,
            pulse_rate: tuning.pulse_rate,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        let dt = sanitize_dt(dt);
        self.age_ms += dt;

        if self.length < self.max_length {
            self.length = (self.length + self.speed * (dt / 1000.0)).min(self.max_length);
        }

        let pulse = ((self.age_ms * self.pulse_rate).sin() + 1.0) * 0.5;
        self.draw_width = self.draw_width_base + pulse * self.draw_width_pulse;

        if self.age_ms > self.sustain_ms {
            let fade_t = if self.fade_ms > 0.0 {
                ((self.age_ms - self.sustain_ms) / self.fade_ms).clamp(0.0, 1.0)
            } else {
                1.0
            };
            // min() keeps opacity non-increasing through float noise
            self.opacity = self.opacity.min(1.0 - fade_t);
        }
    }

    /// Fully faded: no collision, no draw
    pub fn is_spent(&self) -> bool {
        self.opacity <= 0.0
    }

    /// Beam can deal damage this frame
    pub fn is_active(&self) -> bool {
        !self.is_spent() && self.length > 0.0
    }

    /// Opacity as a 0-255 byte
    pub fn alpha(&self) -> u8 {
        (self.opacity.clamp(0.0, 1.0) * 255.0) as u8
    }

    /// Collision quad (fixed hitbox width)
    pub fn hitbox_quad(&self, origin: Vec2) -> BeamQuad {
        BeamQuad::new(origin, self.angle, self.length, self.hitbox_width)
    }

    /// Render quad (pulsing draw width)
    pub fn draw_quad(&self, origin: Vec2) -> BeamQuad {
        BeamQuad::new(origin, self.angle, self.length, self.draw_width)
    }
}
