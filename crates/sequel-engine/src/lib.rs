//! sequel: an immediate-mode 2D batching renderer on wgpu.
//!
//! Shapes submitted to a [`Renderer`] are accumulated in one vertex buffer and
//! drawn in as few calls as possible. The renderer flushes on its own whenever
//! a color, texture or blend change would otherwise apply to geometry queued
//! before it.
//!
//! ```no_run
//! use sequel_engine::{BatchConfig, Color, Rect, Renderer, RecordingBackend, Vec2};
//!
//! # fn main() -> sequel_engine::Result<()> {
//! let mut r = Renderer::new(RecordingBackend::new(), BatchConfig::default())?;
//! r.rectangle(Rect::new(0.0, 0.0, 10.0, 10.0), Vec2::zero(), Vec2::new(1.0, 1.0), 0.0)?;
//! r.set_color(Color::BLACK); // flushes the rectangle first
//! r.flush();
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod batch;
pub mod coords;
pub mod device;
pub mod logging;
pub mod shader;
pub mod transform;
pub mod window;

mod error;
mod renderer;

pub use backend::{
    Backend, Command, GraphicsError, GraphicsErrorKind, RecordingBackend, UniformLocation,
    UniformValue, WgpuBackend,
};
pub use batch::{BatchConfig, BlendFactor, BlendFunc, FilterMode, RenderState, TextureId, Vertex};
pub use coords::{Color, Rect, Vec2};
pub use error::{Error, Result};
pub use renderer::{BatchStats, Renderer};
pub use shader::ShaderOptions;
