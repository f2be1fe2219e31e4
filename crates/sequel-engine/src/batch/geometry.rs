//! Shape tessellation into vertex records.
//!
//! Pure functions: they only compute vertices. Appending them to the pending
//! buffer (and reserving room first) is the renderer's job.

use crate::coords::{Rect, Vec2};

use super::vertex::Vertex;

pub const TRIANGLE_VERTICES: usize = 3;
pub const RECTANGLE_VERTICES: usize = 6;

/// One triangle, vertices in caller order. Winding is not checked.
#[inline]
pub fn triangle(positions: [Vec2; 3], uvs: [Vec2; 3]) -> [Vertex; TRIANGLE_VERTICES] {
    [
        Vertex::from_parts(positions[0], uvs[0]),
        Vertex::from_parts(positions[1], uvs[1]),
        Vertex::from_parts(positions[2], uvs[2]),
    ]
}

/// A rectangle rotated by `angle` radians about its center, as two triangles
/// `(c0, c1, c2)` and `(c2, c3, c0)`.
///
/// `uv0` maps to the origin corner and `uv1` to the far corner; the two other
/// corners mix them (`(u1, v0)` and `(u0, v1)`).
pub fn rectangle(rect: Rect, uv0: Vec2, uv1: Vec2, angle: f32) -> [Vertex; RECTANGLE_VERTICES] {
    let center = rect.center();
    // `cx + (x - cx)` can round, so unrotated corners skip the rotation entirely.
    let [c0, c1, c2, c3] = rect.corners().map(|c| {
        if angle == 0.0 { c } else { c.rotated_about(center, angle) }
    });

    let t0 = Vertex::from_parts(c0, uv0);
    let t1 = Vertex::from_parts(c1, Vec2::new(uv1.x, uv0.y));
    let t2 = Vertex::from_parts(c2, uv1);
    let t3 = Vertex::from_parts(c3, Vec2::new(uv0.x, uv1.y));

    [t0, t1, t2, t2, t3, t0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, TAU};

    const EPS: f32 = 1e-4;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    fn positions(vs: &[Vertex]) -> Vec<Vec2> {
        vs.iter().map(Vertex::position).collect()
    }

    // ── triangle ──────────────────────────────────────────────────────────

    #[test]
    fn triangle_preserves_order() {
        let p = [Vec2::new(0.0, 0.0), Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0)];
        let uv = [Vec2::new(0.1, 0.2), Vec2::new(0.3, 0.4), Vec2::new(0.5, 0.6)];
        let vs = triangle(p, uv);
        assert_eq!(positions(&vs), p.to_vec());
        assert_eq!(vs[2].uv, [0.5, 0.6]);
    }

    // ── rectangle ─────────────────────────────────────────────────────────

    #[test]
    fn unrotated_rectangle_is_exact() {
        let vs = rectangle(Rect::new(0.0, 0.0, 10.0, 10.0), Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), 0.0);
        let pos: Vec<[f32; 2]> = vs.iter().map(|v| v.pos).collect();
        let uv: Vec<[f32; 2]> = vs.iter().map(|v| v.uv).collect();
        assert_eq!(pos, [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]]);
        assert_eq!(uv, [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]);
    }

    #[test]
    fn unrotated_corners_follow_origin_width_height() {
        let (x, y, w, h) = (3.0, -2.0, 5.0, 7.0);
        let vs = rectangle(Rect::new(x, y, w, h), Vec2::zero(), Vec2::new(1.0, 1.0), 0.0);
        assert_eq!(vs[0].position(), Vec2::new(x, y));
        assert_eq!(vs[1].position(), Vec2::new(x + w, y));
        assert_eq!(vs[2].position(), Vec2::new(x + w, y + h));
        assert_eq!(vs[4].position(), Vec2::new(x, y + h));
    }

    #[test]
    fn full_turn_returns_to_unrotated_corners() {
        let rect = Rect::new(4.0, 8.0, 20.0, 6.0);
        let flat = rectangle(rect, Vec2::zero(), Vec2::new(1.0, 1.0), 0.0);
        let turned = rectangle(rect, Vec2::zero(), Vec2::new(1.0, 1.0), TAU);
        for (a, b) in flat.iter().zip(turned.iter()) {
            assert!(close(a.position(), b.position()), "{a:?} vs {b:?}");
            assert_eq!(a.uv, b.uv);
        }
    }

    #[test]
    fn quarter_turn_rotates_about_center() {
        // 2x2 square centered at (1, 1): origin corner goes to (2, 0).
        let vs = rectangle(Rect::new(0.0, 0.0, 2.0, 2.0), Vec2::zero(), Vec2::new(1.0, 1.0), FRAC_PI_2);
        assert!(close(vs[0].position(), Vec2::new(2.0, 0.0)), "{:?}", vs[0]);
        assert!(close(vs[2].position(), Vec2::new(0.0, 2.0)), "{:?}", vs[2]);
    }

    #[test]
    fn diagonal_corners_carry_uv_extremes() {
        let vs = rectangle(Rect::new(0.0, 0.0, 1.0, 1.0), Vec2::new(0.25, 0.5), Vec2::new(0.75, 1.0), 0.3);
        assert_eq!(vs[0].uv, [0.25, 0.5]);
        assert_eq!(vs[1].uv, [0.75, 0.5]);
        assert_eq!(vs[2].uv, [0.75, 1.0]);
        assert_eq!(vs[4].uv, [0.25, 1.0]);
    }

    #[test]
    fn triangles_share_the_diagonal() {
        let vs = rectangle(Rect::new(1.0, 1.0, 3.0, 2.0), Vec2::zero(), Vec2::new(1.0, 1.0), 0.7);
        assert_eq!(vs[2], vs[3]);
        assert_eq!(vs[0], vs[5]);
    }
}
