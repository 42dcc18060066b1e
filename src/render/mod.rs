//! Render boundary
//!
//! The simulation never draws. A host renderer reads a `RenderSnapshot`
//! each frame and may triangulate beams with the helpers in `vertex`.

pub mod snapshot;
pub mod vertex;

pub use snapshot::{BeamSprite, BlasterSprite, Hud, RenderSnapshot, SoulSprite};
pub use vertex::{Vertex, beam_vertices, colors};
