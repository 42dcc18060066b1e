//! Beam vs. soul collision
//!
//! A beam is a thin rectangle and the soul is a circle. The strict
//! point-in-quad test alone misses a soul whose body straddles a beam edge,
//! so a circle-vs-edge distance check runs whenever the center is outside.

use glam::Vec2;

use super::beam::BeamQuad;
use super::blaster::Blaster;
use super::soul::Soul;
use crate::point_segment_distance;

/// Quads thinner than this (twice the area) are treated as degenerate
const MIN_AREA2: f32 = 1e-4;

/// Result of a collision check
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionResult {
    /// Whether the circle touches the quad
    pub hit: bool,
    /// Circle center strictly inside the quad
    pub inside: bool,
    /// Distance from the center to the nearest quad edge
    pub distance: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            inside: false,
            distance: f32::MAX,
        }
    }
}

/// Signed area test of `p` against edge `a`-`b`
#[inline]
fn edge_sign(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
}

/// Center strictly inside the quad (all four edge signs agree)
pub fn point_in_quad(p: Vec2, quad: &BeamQuad) -> bool {
    let signs = quad.edges().map(|(a, b)| edge_sign(p, a, b) < 0.0);
    signs.iter().all(|&s| s == signs[0])
}

/// Check a circle against a beam quad
pub fn beam_circle_collision(quad: &BeamQuad, center: Vec2, radius: f32) -> CollisionResult {
    if !quad.is_finite() || !center.is_finite() || quad.signed_area2().abs() < MIN_AREA2 {
        return CollisionResult::miss();
    }

    let distance = quad
        .edges()
        .iter()
        .map(|&(a, b)| point_segment_distance(center, a, b))
        .fold(f32::MAX, f32::min);

    if point_in_quad(center, quad) {
        return CollisionResult {
            hit: true,
            inside: true,
            distance,
        };
    }

    CollisionResult {
        hit: distance <= radius,
        inside: false,
        distance,
    }
}

/// Full beam rule for a blaster: active beam of positive length, hitbox
/// quad built at the blaster's current mouth position
pub fn blaster_hits_soul(blaster: &Blaster, soul: &Soul) -> bool {
    let Some(beam) = blaster.beam() else {
        return false;
    };
    if !beam.is_active() {
        return false;
    }

    let quad = beam.hitbox_quad(blaster.mouth_position());
    beam_circle_collision(&quad, soul.pos, soul.radius).hit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beam_quad() -> BeamQuad {
        BeamQuad::new(Vec2::ZERO, 0.0, 100.0, 30.0)
    }

    #[test]
    fn test_center_inside_hits() {
        let result = beam_circle_collision(&beam_quad(), Vec2::new(50.0, 0.0), 10.0);
        assert!(result.hit);
        assert!(result.inside);
    }

    #[test]
    fn test_far_target_misses() {
        let result = beam_circle_collision(&beam_quad(), Vec2::new(50.0, 200.0), 10.0);
        assert!(!result.hit);
        assert!(!result.inside);
    }

    #[test]
    fn test_graze_hits_via_edge_distance() {
        // 15 = half width; center 8px beyond the edge, radius 10
        let result = beam_circle_collision(&beam_quad(), Vec2::new(50.0, 23.0), 10.0);
        assert!(result.hit);
        assert!(!result.inside);
        assert!((result.distance - 8.0).abs() < 1e-4);

        let result = beam_circle_collision(&beam_quad(), Vec2::new(50.0, 26.0), 10.0);
        assert!(!result.hit);
    }

    #[test]
    fn test_past_beam_tip() {
        let result = beam_circle_collision(&beam_quad(), Vec2::new(109.0, 0.0), 10.0);
        assert!(result.hit);
        let result = beam_circle_collision(&beam_quad(), Vec2::new(111.0, 0.0), 10.0);
        assert!(!result.hit);
    }

    #[test]
    fn test_rotated_beam() {
        // 90 degrees points up the screen
        let quad = BeamQuad::new(Vec2::new(400.0, 300.0), 90.0, 200.0, 30.0);
        assert!(beam_circle_collision(&quad, Vec2::new(400.0, 150.0), 10.0).hit);
        assert!(!beam_circle_collision(&quad, Vec2::new(400.0, 450.0), 10.0).hit);
    }

    #[test]
    fn test_zero_length_is_degenerate() {
        let quad = BeamQuad::new(Vec2::ZERO, 0.0, 0.0, 30.0);
        assert_eq!(beam_circle_collision(&quad, Vec2::ZERO, 10.0), CollisionResult::miss());
    }

    #[test]
    fn test_non_finite_geometry_misses() {
        let quad = BeamQuad::new(Vec2::new(f32::NAN, 0.0), 0.0, 100.0, 30.0);
        assert!(!beam_circle_collision(&quad, Vec2::ZERO, 10.0).hit);
    }

    mod blaster_rule {
        use super::*;
        use crate::direction_deg;
        use crate::sim::arena::Arena;
        use crate::sim::blaster::{BlasterId, BlasterParams, BlasterPhase};
        use crate::tuning::{BeamTuning, BlasterTuning, SoulTuning};

        fn firing_blaster(beam_ms: f32) -> Blaster {
            let target = Vec2::new(300.0, 300.0);
            let params = BlasterParams {
                target_pos: target,
                target_angle: 0.0,
                open_delay_ms: 0.0,
                beam_ms,
            };
            let mut blaster = Blaster::new(
                BlasterId(1),
                params,
                target,
                &BlasterTuning::default(),
                &BeamTuning::default(),
            );
            while blaster.phase != BlasterPhase::Firing {
                blaster.update(10.0);
            }
            // One step of growth
            blaster.update(10.0);
            blaster
        }

        fn soul_at(pos: Vec2) -> Soul {
            let mut soul = Soul::new(Arena::default().battle_box, &SoulTuning::default());
            soul.pos = pos;
            soul
        }

        #[test]
        fn test_soul_in_front_of_mouth_is_hit() {
            let blaster = firing_blaster(600.0);
            let beam = blaster.beam().expect("firing blaster has a beam");
            let inside = blaster.mouth_position() + direction_deg(0.0) * (beam.length * 0.5);
            assert!(blaster_hits_soul(&blaster, &soul_at(inside)));
        }

        #[test]
        fn test_faded_beam_never_hits() {
            let mut blaster = firing_blaster(0.0);
            while !blaster.is_spent() {
                blaster.update(10.0);
            }
            let beam = blaster.beam().expect("firing blaster has a beam");
            assert_eq!(beam.opacity, 0.0);

            // Geometrically the soul sits inside the hitbox
            let inside = blaster.mouth_position() + direction_deg(0.0) * (beam.length * 0.5);
            let quad = beam.hitbox_quad(blaster.mouth_position());
            assert!(beam_circle_collision(&quad, inside, 10.0).inside);

            assert!(!blaster_hits_soul(&blaster, &soul_at(inside)));
        }

        #[test]
        fn test_hitbox_starts_at_mouth_not_center() {
            let blaster = firing_blaster(600.0);
            let mouth = blaster.mouth_position();
            assert!((mouth - blaster.pos).length() > 39.0);

            // Between the body center and the mouth, 20px behind the mouth
            let behind = mouth - direction_deg(0.0) * 20.0;
            let soul = soul_at(behind);
            assert!(!blaster_hits_soul(&blaster, &soul));

            // A quad anchored at the center would have caught it
            let beam = blaster.beam().expect("firing blaster has a beam");
            let centered = beam.hitbox_quad(blaster.pos);
            assert!(beam_circle_collision(&centered, behind, soul.radius).hit);
        }

        #[test]
        fn test_blaster_without_beam_never_hits() {
            let params = BlasterParams {
                target_pos: Vec2::new(400.0, 300.0),
                target_angle: 0.0,
                open_delay_ms: 0.0,
                beam_ms: 600.0,
            };
            let blaster = Blaster::new(
                BlasterId(2),
                params,
                Vec2::new(400.0, 300.0),
                &BlasterTuning::default(),
                &BeamTuning::default(),
            );
            assert!(!blaster_hits_soul(&blaster, &soul_at(Vec2::new(400.0, 300.0))));
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn verdict_invariant_under_translation(
                angle in -360.0f32..360.0,
                length in 1.0f32..500.0,
                px in -300.0f32..300.0,
                py in -300.0f32..300.0,
                tx in -1000.0f32..1000.0,
                ty in -1000.0f32..1000.0,
            ) {
                let quad = BeamQuad::new(Vec2::ZERO, angle, length, 30.0);
                let target = Vec2::new(px, py);
                let base = beam_circle_collision(&quad, target, 10.0);

                // Skip near-boundary cases where float rounding can flip the verdict
                prop_assume!((base.distance - 10.0).abs() > 1e-2 && base.distance > 1e-2);

                let offset = Vec2::new(tx, ty);
                let moved = beam_circle_collision(&quad.translated(offset), target + offset, 10.0);
                prop_assert_eq!(base.hit, moved.hit);
            }
        }
    }
}
