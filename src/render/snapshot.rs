//! Read-only view of one frame for the host renderer

use glam::Vec2;
use serde::Serialize;

use crate::sim::animation::FrameId;
use crate::sim::arena::Rect;
use crate::sim::beam::BeamQuad;
use crate::sim::blaster::BlasterId;
use crate::sim::state::{GamePhase, GameState};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlasterSprite {
    pub id: BlasterId,
    pub frame: FrameId,
    pub pos: Vec2,
    /// Facing (degrees, 0 = right, 90 = up)
    pub rotation_deg: f32,
    pub alpha: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BeamSprite {
    /// Draw-width quad anchored at the blaster mouth
    pub quad: BeamQuad,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SoulSprite {
    pub pos: Vec2,
    pub radius: f32,
    /// Flicker phase (false = draw dimmed)
    pub bright: bool,
    /// Swap to the hurt sprite
    pub damaged: bool,
}

/// Numbers the HUD shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub hp: u32,
    pub max_hp: u32,
    pub score: u64,
    pub high_score: u64,
    pub combo: u32,
    pub level: u32,
    pub game_over: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub battle_box: Rect,
    pub blasters: Vec<BlasterSprite>,
    pub beams: Vec<BeamSprite>,
    pub soul: SoulSprite,
    pub hud: Hud,
}

impl RenderSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        let live = state.scheduler.live();

        let blasters = live
            .iter()
            .map(|b| BlasterSprite {
                id: b.id,
                frame: b.current_frame(),
                pos: b.pos,
                rotation_deg: b.facing,
                alpha: b.alpha(),
            })
            .collect();

        let beams = live
            .iter()
            .filter_map(|b| {
                let beam = b.beam()?;
                beam.is_active().then(|| BeamSprite {
                    quad: beam.draw_quad(b.mouth_position()),
                    opacity: beam.opacity,
                })
            })
            .collect();

        let soul = &state.soul;

        Self {
            battle_box: state.arena.battle_box,
            blasters,
            beams,
            soul: SoulSprite {
                pos: soul.pos,
                radius: soul.radius,
                bright: soul.renders_bright(),
                damaged: soul.is_damaged_look(),
            },
            hud: Hud {
                hp: soul.hp,
                max_hp: soul.max_hp,
                score: state.score.score,
                high_score: state.score.high_score,
                combo: state.score.combo,
                level: state.level,
                game_over: state.phase == GamePhase::GameOver,
            },
        }
    }
}
