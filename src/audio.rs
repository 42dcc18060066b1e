//! Sound cue policy
//!
//! The simulation never plays audio. It reports cues to an `AudioPolicy`,
//! which decides which ones get voiced; the host drains accepted cues and
//! hands them to whatever sound backend it owns. Nothing in the sim depends
//! on a cue being accepted.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::tuning::AudioTuning;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// Blaster materialized and starts charging
    Charge,
    /// Blaster opened its mouth and the beam starts
    Fire,
}

/// Collaborator that gates sound cues
pub trait AudioPolicy {
    /// Offer a cue at simulation time `now_ms`. Returns true if accepted.
    fn offer(&mut self, cue: SoundCue, now_ms: f64) -> bool;

    /// Take every accepted cue since the last drain, oldest first
    fn drain(&mut self) -> Vec<SoundCue>;
}

/// Global cooldown throttle: at most one voiced cue per `cooldown_ms`
#[derive(Debug, Clone)]
pub struct CooldownAudioPolicy {
    cooldown_ms: f64,
    last_voiced_ms: Option<f64>,
    muted: bool,
    accepted: VecDeque<SoundCue>,
}

impl Default for CooldownAudioPolicy {
    fn default() -> Self {
        Self::new(&AudioTuning::default())
    }
}

impl CooldownAudioPolicy {
    pub fn new(tuning: &AudioTuning) -> Self {
        Self {
            cooldown_ms: tuning.cooldown_ms.max(0.0),
            last_voiced_ms: None,
            muted: false,
            accepted: VecDeque::new(),
        }
    }

    /// Mute/unmute all cues
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

impl AudioPolicy for CooldownAudioPolicy {
    fn offer(&mut self, cue: SoundCue, now_ms: f64) -> bool {
        if self.muted {
            return false;
        }
        if let Some(last) = self.last_voiced_ms
            && now_ms - last < self.cooldown_ms
        {
            log::trace!("Throttled {:?} at {:.0}ms", cue, now_ms);
            return false;
        }
        self.last_voiced_ms = Some(now_ms);
        self.accepted.push_back(cue);
        true
    }

    fn drain(&mut self) -> Vec<SoundCue> {
        self.accepted.drain(..).collect()
    }
}

/// Policy that discards everything (headless runs, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioPolicy for SilentAudio {
    fn offer(&mut self, _cue: SoundCue, _now_ms: f64) -> bool {
        false
    }

    fn drain(&mut self) -> Vec<SoundCue> {
        Vec::new()
    }
}
