use std::num::NonZeroU32;

use crate::coords::Color;

/// Handle to a texture created by a backend.
///
/// Never zero: "no texture" is `Option::<TextureId>::None`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(NonZeroU32);

impl TextureId {
    #[inline]
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

/// Texture sampling filter for magnification and minification.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum FilterMode {
    #[default]
    Nearest,
    Linear,
}

impl From<FilterMode> for wgpu::FilterMode {
    fn from(f: FilterMode) -> Self {
        match f {
            FilterMode::Nearest => wgpu::FilterMode::Nearest,
            FilterMode::Linear => wgpu::FilterMode::Linear,
        }
    }
}

/// Blend factor applied to the source or destination color.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstColor,
    OneMinusDstColor,
    DstAlpha,
    OneMinusDstAlpha,
}

impl From<BlendFactor> for wgpu::BlendFactor {
    fn from(f: BlendFactor) -> Self {
        match f {
            BlendFactor::Zero => wgpu::BlendFactor::Zero,
            BlendFactor::One => wgpu::BlendFactor::One,
            BlendFactor::SrcColor => wgpu::BlendFactor::Src,
            BlendFactor::OneMinusSrcColor => wgpu::BlendFactor::OneMinusSrc,
            BlendFactor::SrcAlpha => wgpu::BlendFactor::SrcAlpha,
            BlendFactor::OneMinusSrcAlpha => wgpu::BlendFactor::OneMinusSrcAlpha,
            BlendFactor::DstColor => wgpu::BlendFactor::Dst,
            BlendFactor::OneMinusDstColor => wgpu::BlendFactor::OneMinusDst,
            BlendFactor::DstAlpha => wgpu::BlendFactor::DstAlpha,
            BlendFactor::OneMinusDstAlpha => wgpu::BlendFactor::OneMinusDstAlpha,
        }
    }
}

/// Source/destination blend factors, `result = src * src_factor + dst * dst_factor`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BlendFunc {
    pub src: BlendFactor,
    pub dst: BlendFactor,
}

impl BlendFunc {
    /// Straight alpha blending; the initial blend of every renderer.
    pub const ALPHA: BlendFunc = BlendFunc::new(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha);
    pub const ADDITIVE: BlendFunc = BlendFunc::new(BlendFactor::SrcAlpha, BlendFactor::One);
    pub const PREMULTIPLIED: BlendFunc = BlendFunc::new(BlendFactor::One, BlendFactor::OneMinusSrcAlpha);
    pub const REPLACE: BlendFunc = BlendFunc::new(BlendFactor::One, BlendFactor::Zero);

    #[inline]
    pub const fn new(src: BlendFactor, dst: BlendFactor) -> Self {
        Self { src, dst }
    }

    /// Same factors for color and alpha, additive operation.
    pub fn to_wgpu(self) -> wgpu::BlendState {
        let component = wgpu::BlendComponent {
            src_factor: self.src.into(),
            dst_factor: self.dst.into(),
            operation: wgpu::BlendOperation::Add,
        };
        wgpu::BlendState {
            color: component,
            alpha: component,
        }
    }
}

impl Default for BlendFunc {
    fn default() -> Self {
        Self::ALPHA
    }
}

/// The state every vertex of one batch is drawn under.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderState {
    pub color: Color,
    pub texture: Option<TextureId>,
    pub blend: BlendFunc,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            texture: None,
            blend: BlendFunc::ALPHA,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_id_zero_is_none() {
        assert!(TextureId::new(0).is_none());
        assert_eq!(TextureId::new(7).map(TextureId::get), Some(7));
    }

    #[test]
    fn default_state_is_white_untextured_alpha_blend() {
        let s = RenderState::default();
        assert_eq!(s.color, Color::WHITE);
        assert_eq!(s.texture, None);
        assert_eq!(s.blend, BlendFunc::new(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha));
    }

    #[test]
    fn alpha_blend_matches_wgpu_preset() {
        // Alpha uses the same factors as color here, unlike wgpu's OVER alpha.
        assert_eq!(BlendFunc::ALPHA.to_wgpu().color, wgpu::BlendState::ALPHA_BLENDING.color);
        assert_eq!(BlendFunc::REPLACE.to_wgpu(), wgpu::BlendState::REPLACE);
    }
}
