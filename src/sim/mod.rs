//! Deterministic simulation module
//!
//! All gameplay decisions live here. This module must stay pure:
//! - Time advances only through `dt` handed in by the host
//! - Randomness only from the state's seeded RNG
//! - Stable iteration order (spawn order)
//! - No rendering, audio output or platform dependencies

pub mod animation;
pub mod arena;
pub mod beam;
pub mod blaster;
pub mod collision;
pub mod pattern;
pub mod scheduler;
pub mod score;
pub mod soul;
pub mod state;
pub mod tick;

pub use animation::{Animation, FrameId};
pub use arena::{Arena, Rect};
pub use beam::{Beam, BeamQuad};
pub use blaster::{Blaster, BlasterEvent, BlasterId, BlasterParams, BlasterPhase};
pub use collision::{CollisionResult, beam_circle_collision, blaster_hits_soul, point_in_quad};
pub use pattern::{
    PatternGenerator, PatternKind, attack_cooldown_ms, beam_duration_ms, burst_commands,
    level_for_score,
};
pub use scheduler::{Command, PendingSpawn, Scheduler};
pub use score::ScoreKeeper;
pub use soul::{Soul, SoulInput};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
