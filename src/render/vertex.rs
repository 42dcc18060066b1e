//! Vertex types for beam quads

use bytemuck::{Pod, Zeroable};

use super::snapshot::BeamSprite;

/// 2D vertex with position and color, laid out for direct GPU upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for encounter elements
pub mod colors {
    pub const BEAM: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}

/// Two triangles per beam, alpha scaled by beam opacity
pub fn beam_vertices(beams: &[BeamSprite]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(beams.len() * 6);

    for beam in beams {
        let mut color = colors::BEAM;
        color[3] *= beam.opacity;
        let [a, b, c, d] = beam.quad.corners;

        for p in [a, b, c, c, d, a] {
            vertices.push(Vertex::new(p.x, p.y, color));
        }
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::beam::BeamQuad;
    use glam::Vec2;

    #[test]
    fn test_vertex_is_pod() {
        let v = Vertex::new(1.0, 2.0, [0.1, 0.2, 0.3, 0.4]);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), std::mem::size_of::<Vertex>());
        assert_eq!(bytes.len(), 24);
        let back: Vertex = *bytemuck::from_bytes(bytes);
        assert_eq!(back, v);
    }

    #[test]
    fn test_beam_triangulation() {
        let sprite = BeamSprite {
            quad: BeamQuad::new(Vec2::ZERO, 0.0, 100.0, 20.0),
            opacity: 0.5,
        };
        let vertices = beam_vertices(&[sprite]);
        assert_eq!(vertices.len(), 6);
        assert!(vertices.iter().all(|v| v.color[3] == 0.5));
        assert!(vertices.iter().all(|v| v.color[..3] == colors::BEAM[..3]));
        assert_eq!(vertices[0], vertices[5]);
        assert_eq!(vertices[2], vertices[3]);
    }

    #[test]
    fn test_no_beams_no_vertices() {
        assert!(beam_vertices(&[]).is_empty());
    }
}
