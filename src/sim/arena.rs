//! Battle box and world bounds
//!
//! Screen space, Y grows downward: `min` is the top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::{ArenaTuning, RectSpec};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + w, y + h),
        }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Shrink (positive margin) or grow (negative) on every side
    pub fn inset(&self, margin: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(margin),
            max: self.max - Vec2::splat(margin),
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }
}

impl From<RectSpec> for Rect {
    fn from(spec: RectSpec) -> Self {
        Rect::new(spec.x, spec.y, spec.w, spec.h)
    }
}

/// Battle box the soul lives in, plus the wider world blasters fly through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    pub battle_box: Rect,
    pub world: Rect,
    /// Distance outside `world` at which a drifting blaster is discarded
    pub reap_margin: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(&ArenaTuning::default())
    }
}

impl Arena {
    pub fn new(tuning: &ArenaTuning) -> Self {
        Self {
            battle_box: tuning.battle_box.into(),
            world: tuning.world.into(),
            reap_margin: tuning.reap_margin,
        }
    }

    /// Region a blaster may occupy before it is reaped
    pub fn keep_alive_bounds(&self) -> Rect {
        self.world.inset(-self.reap_margin)
    }

    pub fn center(&self) -> Vec2 {
        self.battle_box.center()
    }

    /// Points `offset` px outside each edge midpoint: (top, bottom, left, right)
    pub fn edge_midpoints(&self, offset: f32) -> [Vec2; 4] {
        let b = &self.battle_box;
        let c = b.center();
        [
            Vec2::new(c.x, b.top() - offset),
            Vec2::new(c.x, b.bottom() + offset),
            Vec2::new(b.left() - offset, c.y),
            Vec2::new(b.right() + offset, c.y),
        ]
    }
}
