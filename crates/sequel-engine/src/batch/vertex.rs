use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;

/// Scalars per vertex record in the flat buffer view.
pub const FLOATS_PER_VERTEX: usize = 4;

/// Interleaved vertex record: position then texture coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x2  // uv
    ];

    #[inline]
    pub const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self { pos: [x, y], uv: [u, v] }
    }

    #[inline]
    pub fn from_parts(pos: Vec2, uv: Vec2) -> Self {
        Self::new(pos.x, pos.y, uv.x, uv.y)
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::from(self.pos)
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}
