//! Blaster lifecycle: appear, open, fire
//!
//! A blaster eases in from a random spawn point while spinning toward its
//! firing angle, opens its mouth (optionally holding open for a delay), then
//! fires a single beam and recoils backward with increasing speed until the
//! scheduler reaps it.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::animation::{Animation, FrameId};
use super::arena::Rect;
use super::beam::Beam;
use crate::tuning::{BeamTuning, BlasterTuning, SpawnJitter};
use crate::{direction_deg, ease_out_quad, normalize_angle_deg, sanitize_dt};

/// Blaster entity ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlasterId(pub u32);

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlasterPhase {
    /// Easing from spawn point to resting point, fading in
    Appearing,
    /// Mouth opening (beam not yet fired)
    Opening,
    /// Beam live, blaster recoiling
    Firing,
}

/// Transitions the caller may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlasterEvent {
    /// Appearing finished, mouth starts opening
    OpenStarted,
    /// Beam created
    FireStarted,
}

/// Sprite frames for each phase
pub mod frames {
    use super::FrameId;

    pub const APPEAR: [FrameId; 1] = [FrameId(1)];
    pub const OPEN: [FrameId; 3] = [FrameId(2), FrameId(3), FrameId(4)];
    pub const FIRE: [FrameId; 2] = [FrameId(5), FrameId(6)];
}

/// Parameters fixed at spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlasterParams {
    /// Resting position
    pub target_pos: Vec2,
    /// Firing angle (degrees)
    pub target_angle: f32,
    /// Hold with the mouth open before the open animation runs (ms)
    pub open_delay_ms: f32,
    /// Beam sustain before it starts fading (ms)
    pub beam_ms: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blaster {
    pub id: BlasterId,
    pub phase: BlasterPhase,
    pub spawn_pos: Vec2,
    pub target_pos: Vec2,
    pub pos: Vec2,
    /// Current facing (degrees)
    pub facing: f32,
    pub target_angle: f32,
    /// Body opacity (0-1)
    pub opacity: f32,
    /// Time spent in the current phase (ms)
    pub phase_ms: f32,
    pub open_delay_ms: f32,
    /// Recoil speed (px per step), grows while firing
    pub back_speed: f32,
    beam_ms: f32,
    beam: Option<Beam>,
    anim_appear: Animation,
    anim_open: Animation,
    anim_fire: Animation,
    appear_ms: f32,
    spin_ease_fraction: f32,
    mouth_offset: f32,
    recoil_accel: f32,
    beam_tuning: BeamTuning,
}

/// Pick a spawn point inside the jitter bounds (inclusive)
pub fn roll_spawn_point<R: Rng>(jitter: &SpawnJitter, rng: &mut R) -> Vec2 {
    Vec2::new(
        rng.random_range(jitter.min.x..=jitter.max.x),
        rng.random_range(jitter.min.y..=jitter.max.y),
    )
}

impl Blaster {
    pub fn new(
        id: BlasterId,
        params: BlasterParams,
        spawn_pos: Vec2,
        tuning: &BlasterTuning,
        beam_tuning: &BeamTuning,
    ) -> Self {
        Self {
            id,
            phase: BlasterPhase::Appearing,
            spawn_pos,
            target_pos: params.target_pos,
            pos: spawn_pos,
            facing: params.target_angle + tuning.entry_spin_deg,
            target_angle: params.target_angle,
            opacity: 0.0,
            phase_ms: 0.0,
            open_delay_ms: params.open_delay_ms.max(0.0),
            back_speed: 0.0,
            beam_ms: params.beam_ms,
            beam: None,
            anim_appear: Animation::new(frames::APPEAR.to_vec(), tuning.appear_frame_ms, false),
            anim_open: Animation::new(frames::OPEN.to_vec(), tuning.open_frame_ms, false),
            anim_fire: Animation::new(frames::FIRE.to_vec(), tuning.fire_frame_ms, true),
            appear_ms: tuning.appear_ms,
            spin_ease_fraction: tuning.spin_ease_fraction,
            mouth_offset: tuning.mouth_offset,
            recoil_accel: tuning.recoil_accel,
            beam_tuning: beam_tuning.clone(),
        }
    }

    /// Advance one step
    pub fn update(&mut self, dt: f32) -> Option<BlasterEvent> {
        let dt = sanitize_dt(dt);
        if self.is_spent() {
            return None;
        }

        match self.phase {
            BlasterPhase::Appearing => self.update_appearing(dt),
            BlasterPhase::Opening => self.update_opening(dt),
            BlasterPhase::Firing => {
                self.update_firing(dt);
                None
            }
        }
    }

    fn update_appearing(&mut self, dt: f32) -> Option<BlasterEvent> {
        self.phase_ms += dt;
        self.anim_appear.advance(dt);

        let t = if self.appear_ms > 0.0 {
            (self.phase_ms / self.appear_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let ease_t = ease_out_quad(t);

        self.pos = self.spawn_pos.lerp(self.target_pos, ease_t);
        self.opacity = ease_t;

        // Remove a fixed fraction of what's left, so the spin decelerates
        let diff = normalize_angle_deg(self.facing - self.target_angle);
        self.facing = normalize_angle_deg(self.facing - diff * self.spin_ease_fraction);

        if t >= 1.0 {
            self.phase = BlasterPhase::Opening;
            self.phase_ms = 0.0;
            self.pos = self.target_pos;
            self.opacity = 1.0;
            self.facing = normalize_angle_deg(self.target_angle);
            log::debug!("Blaster {:?} opening at {:?}", self.id, self.pos);
            return Some(BlasterEvent::OpenStarted);
        }
        None
    }

    fn update_opening(&mut self, dt: f32) -> Option<BlasterEvent> {
        if self.phase_ms < self.open_delay_ms {
            self.phase_ms += dt;
            return None;
        }

        self.anim_open.advance(dt);
        if self.anim_open.is_finished() {
            self.phase = BlasterPhase::Firing;
            self.phase_ms = 0.0;
            self.beam = Some(Beam::new(self.target_angle, self.beam_ms, &self.beam_tuning));
            log::debug!("Blaster {:?} firing at {:.0} deg", self.id, self.target_angle);
            return Some(BlasterEvent::FireStarted);
        }
        None
    }

    fn update_firing(&mut self, dt: f32) {
        self.phase_ms += dt;
        self.anim_fire.advance(dt);
        if let Some(beam) = &mut self.beam {
            beam.advance(dt);
        }

        // Speed grows linearly, so displacement grows quadratically
        let back = -direction_deg(self.target_angle);
        self.back_speed += self.recoil_accel * dt;
        self.pos += back * self.back_speed;
    }

    pub fn beam(&self) -> Option<&Beam> {
        self.beam.as_ref()
    }

    /// Beam origin in front of the sprite, from the current facing
    pub fn mouth_position(&self) -> Vec2 {
        self.pos + direction_deg(self.facing) * self.mouth_offset
    }

    /// Beam fully faded
    pub fn is_spent(&self) -> bool {
        self.beam.as_ref().is_some_and(Beam::is_spent)
    }

    pub fn is_out_of_bounds(&self, keep_alive: &Rect) -> bool {
        !keep_alive.contains(self.pos)
    }

    /// Frame for the renderer
    pub fn current_frame(&self) -> FrameId {
        match self.phase {
            BlasterPhase::Appearing => self.anim_appear.current_frame(),
            BlasterPhase::Opening => self.anim_open.current_frame(),
            BlasterPhase::Firing => self.anim_fire.current_frame(),
        }
    }

    /// Body opacity as a 0-255 byte
    pub fn alpha(&self) -> u8 {
        (self.opacity.clamp(0.0, 1.0) * 255.0) as u8
    }
}
