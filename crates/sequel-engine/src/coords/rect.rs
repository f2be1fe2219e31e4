use super::Vec2;

/// Axis-aligned rectangle given by its origin corner and size.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(
            self.origin.x + self.size.x * 0.5,
            self.origin.y + self.size.y * 0.5,
        )
    }

    /// Corners in emission order: origin, +x, far corner, +y.
    ///
    /// Negative sizes are kept as given; the winding flips accordingly.
    #[inline]
    pub fn corners(self) -> [Vec2; 4] {
        let Vec2 { x, y } = self.origin;
        let Vec2 { x: x1, y: y1 } = self.max();
        [
            Vec2::new(x, y),
            Vec2::new(x1, y),
            Vec2::new(x1, y1),
            Vec2::new(x, y1),
        ]
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x == 0.0 || self.size.y == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── corners ───────────────────────────────────────────────────────────

    #[test]
    fn corners_follow_origin_then_clockwise_in_y_down() {
        let c = r(1.0, 2.0, 10.0, 20.0).corners();
        assert_eq!(c[0], Vec2::new(1.0, 2.0));
        assert_eq!(c[1], Vec2::new(11.0, 2.0));
        assert_eq!(c[2], Vec2::new(11.0, 22.0));
        assert_eq!(c[3], Vec2::new(1.0, 22.0));
    }

    #[test]
    fn corners_keep_negative_size() {
        let c = r(10.0, 0.0, -4.0, 5.0).corners();
        assert_eq!(c[1], Vec2::new(6.0, 0.0));
    }

    // ── center ────────────────────────────────────────────────────────────

    #[test]
    fn center_is_midpoint() {
        assert_eq!(r(0.0, 0.0, 10.0, 4.0).center(), Vec2::new(5.0, 2.0));
    }

    // ── is_empty ──────────────────────────────────────────────────────────

    #[test]
    fn is_empty_zero_size() {
        assert!(r(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(r(0.0, 0.0, 5.0, 0.0).is_empty());
    }

    #[test]
    fn is_empty_nonzero_size() {
        assert!(!r(0.0, 0.0, 1.0, 1.0).is_empty());
        assert!(!r(0.0, 0.0, -1.0, 1.0).is_empty());
    }
}
