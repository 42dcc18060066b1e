//! Frame-indexed sprite animation
//!
//! Produces a frame identifier from elapsed time. The sprite data behind a
//! `FrameId` belongs to the renderer.

use serde::{Deserialize, Serialize};

use crate::sanitize_dt;

/// Opaque sprite frame identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameId(pub u16);

/// Timer that walks an ordered list of frames
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animation {
    frames: Vec<FrameId>,
    frame_ms: f32,
    looping: bool,
    elapsed_ms: f32,
    index: usize,
    finished: bool,
}

impl Animation {
    pub fn new(frames: Vec<FrameId>, frame_ms: f32, looping: bool) -> Self {
        let frames = if frames.is_empty() {
            vec![FrameId(0)]
        } else {
            frames
        };
        Self {
            frames,
            frame_ms,
            looping,
            elapsed_ms: 0.0,
            index: 0,
            finished: false,
        }
    }

    /// Advance by `dt` ms. At most one frame step per call.
    pub fn advance(&mut self, dt: f32) {
        if self.finished {
            return;
        }

        self.elapsed_ms += sanitize_dt(dt);
        if self.elapsed_ms >= self.frame_ms {
            self.elapsed_ms = 0.0;
            self.index += 1;

            if self.index >= self.frames.len() {
                if self.looping {
                    self.index = 0;
                } else {
                    self.index = self.frames.len() - 1;
                    self.finished = true;
                }
            }
        }
    }

    pub fn current_frame(&self) -> FrameId {
        self.frames[self.index]
    }

    pub fn frame_index(&self) -> usize {
        self.index
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Non-looping animation reached its last frame (never un-sets)
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
