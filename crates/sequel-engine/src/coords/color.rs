/// Straight-alpha RGBA color, components nominally in `[0, 1]`.
///
/// Equality is exact per component. The render state tracker relies on this:
/// two colors that differ by any bit force a flush.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from straight sRGB bytes (`0`–`255`).
    #[inline]
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Color> for wgpu::Color {
    fn from(c: Color) -> Self {
        wgpu::Color {
            r: c.r as f64,
            g: c.g as f64,
            b: c.b as f64,
            a: c.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_maps_full_range() {
        assert_eq!(Color::from_rgba_u8(255, 0, 255, 0), Color::new(1.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn equality_is_exact() {
        let a = Color::new(0.5, 0.5, 0.5, 1.0);
        let b = Color::new(0.5 + f32::EPSILON, 0.5, 0.5, 1.0);
        assert_ne!(a, b);
    }

    #[test]
    fn converts_to_wgpu_color() {
        let c: wgpu::Color = Color::new(0.25, 0.5, 0.75, 1.0).into();
        assert_eq!((c.r, c.g, c.b, c.a), (0.25, 0.5, 0.75, 1.0));
    }
}
