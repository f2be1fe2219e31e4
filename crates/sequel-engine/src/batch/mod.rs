//! Batching core.
//!
//! Shape calls append vertices to a [`VertexBuffer`]; the [`Renderer`](crate::Renderer)
//! drains it into a single draw whenever the render state changes or the caller
//! flushes explicitly. Everything in here is backend-agnostic CPU state.

mod buffer;
mod config;
pub mod geometry;
mod state;
mod vertex;

pub use buffer::{Growth, VertexBuffer};
pub use config::BatchConfig;
pub use state::{BlendFactor, BlendFunc, FilterMode, RenderState, TextureId};
pub use vertex::{Vertex, FLOATS_PER_VERTEX};
