//! Transform uniform construction.

use glam::{Mat4, Vec3};

/// Builds the transform uniform from a view offset, a non-uniform scale and a
/// rotation in degrees.
///
/// The result is `T(-x, -y) · S(scale_x, scale_y) · R(angle)`: vertices are
/// rotated, then scaled, then shifted by the *negated* offset, so `(x, y)`
/// behaves like a camera position.
pub fn view_matrix(x: f32, y: f32, scale_x: f32, scale_y: f32, angle_degrees: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(-x, -y, 0.0))
        * Mat4::from_scale(Vec3::new(scale_x, scale_y, 1.0))
        * Mat4::from_rotation_z(angle_degrees.to_radians())
}

/// Transform mapping a `width` × `height` pixel space (origin top-left, +Y
/// down) to clip space.
pub fn pixel_space(width: f32, height: f32) -> Mat4 {
    view_matrix(1.0, -1.0, 2.0 / width.max(1.0), -2.0 / height.max(1.0), 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    const EPS: f32 = 1e-5;

    #[test]
    fn defaults_are_identity() {
        assert_eq!(view_matrix(0.0, 0.0, 1.0, 1.0, 0.0), Mat4::IDENTITY);
    }

    #[test]
    fn column_layout_matches_rotation_scale_then_negated_offset() {
        let (sx, sy, deg) = (2.0, 3.0, 30.0_f32);
        let m = view_matrix(5.0, 7.0, sx, sy, deg);
        let (s, c) = deg.to_radians().sin_cos();
        let expected = Mat4::from_cols(
            Vec4::new(sx * c, sy * s, 0.0, 0.0),
            Vec4::new(-sx * s, sy * c, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(-5.0, -7.0, 0.0, 1.0),
        );
        assert!(m.abs_diff_eq(expected, EPS), "{m:?}");
    }

    #[test]
    fn each_call_is_independent() {
        let a = view_matrix(1.0, 2.0, 3.0, 4.0, 45.0);
        let _ = view_matrix(9.0, 9.0, 9.0, 9.0, 90.0);
        assert_eq!(a, view_matrix(1.0, 2.0, 3.0, 4.0, 45.0));
    }

    #[test]
    fn pixel_space_maps_corners_to_clip_space() {
        let m = pixel_space(800.0, 600.0);
        let tl = m.transform_point3(Vec3::new(0.0, 0.0, 0.0));
        let br = m.transform_point3(Vec3::new(800.0, 600.0, 0.0));
        assert!(tl.abs_diff_eq(Vec3::new(-1.0, 1.0, 0.0), EPS), "{tl:?}");
        assert!(br.abs_diff_eq(Vec3::new(1.0, -1.0, 0.0), EPS), "{br:?}");
    }
}
