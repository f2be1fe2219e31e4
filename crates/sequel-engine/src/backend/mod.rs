//! GPU collaborator seam.
//!
//! The [`Renderer`](crate::Renderer) owns all batching decisions and talks to the
//! graphics API only through [`Backend`]. Two implementations ship:
//! - [`WgpuBackend`]: the real one, one submission per draw.
//! - [`RecordingBackend`]: keeps every command in memory, for tests and tooling.

mod recording;
mod wgpu_backend;

use std::fmt;

use glam::Mat4;

use crate::batch::{BlendFunc, FilterMode, TextureId, Vertex};
use crate::coords::Color;

pub use self::recording::{Command, RecordingBackend};
pub use self::wgpu_backend::WgpuBackend;

/// Slot of a user uniform declared at backend creation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

/// Value written to a user uniform slot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec4([f32; 4]),
    Int(i32),
}

/// Category of a graphics API error.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GraphicsErrorKind {
    Validation,
    OutOfMemory,
    Internal,
}

/// Error reported by the graphics API, surfaced only through polling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphicsError {
    pub kind: GraphicsErrorKind,
    pub message: String,
}

impl GraphicsError {
    pub fn new(kind: GraphicsErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} error: {}", self.kind, self.message)
    }
}

impl std::error::Error for GraphicsError {}

/// Validated RGBA8 image handed to [`Backend::create_texture`].
#[derive(Debug, Copy, Clone)]
pub struct TextureImage<'a> {
    pub pixels: &'a [u8],
    pub width: u32,
    pub height: u32,
    pub filter: FilterMode,
}

/// Graphics API operations the batching engine needs.
///
/// Calls arrive in program order and must take effect in that order: state set
/// before a `draw` applies to it, state set after does not.
pub trait Backend {
    /// Resizes the vertex buffer mirror to `capacity` vertices. Prior contents
    /// may be discarded.
    fn resize_vertex_buffer(&mut self, capacity: usize);

    /// Uploads `vertices` to the start of the mirror and issues one triangle-list
    /// draw covering all of them.
    ///
    /// Returns `false` when the batch was dropped instead (nothing to render into).
    fn draw(&mut self, vertices: &[Vertex]) -> bool;

    fn set_color(&mut self, color: Color);

    fn set_transform(&mut self, matrix: Mat4);

    /// `None` disables texture sampling.
    fn bind_texture(&mut self, texture: Option<TextureId>);

    /// Applied on every call, even when unchanged.
    fn set_blend(&mut self, blend: BlendFunc);

    fn clear(&mut self, color: Color);

    fn create_texture(&mut self, image: TextureImage<'_>) -> TextureId;

    /// Returns `false` if `texture` did not name a live texture.
    fn free_texture(&mut self, texture: TextureId) -> bool;

    /// Looks a user uniform up in the table built at creation.
    fn uniform_location(&self, name: &str) -> Option<UniformLocation>;

    fn set_uniform(&mut self, location: UniformLocation, value: UniformValue);

    /// Newest collected error, if any. `drain` discards the others.
    ///
    /// "Newest" is in collection order. A backend that only learns about errors
    /// when polled may keep a single error per category for the whole interval
    /// since the previous poll; see [`WgpuBackend`].
    fn poll_error(&mut self, drain: bool) -> Option<GraphicsError>;

    /// Releases every GPU resource. Called once, at teardown.
    fn release(&mut self);
}
