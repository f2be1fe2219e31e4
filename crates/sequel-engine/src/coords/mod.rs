//! Value types shared by the batching core and the backends.
//!
//! Geometry is plain `f32` data in whatever space the active transform maps
//! to clip space. With the identity transform, positions are NDC.

mod color;
mod rect;
mod vec2;

pub use color::Color;
pub use rect::Rect;
pub use vec2::Vec2;
